//! Emission line lists of calibration lamps (air wavelengths, nm).

/// A calibration material and its emission lines, ascending.
#[derive(Debug, Clone, Copy)]
pub struct LineList {
    /// Material name as advertised by the engine.
    pub name: &'static str,
    /// Line wavelengths in nm.
    pub lines: &'static [f64],
}

const NEON: &[f64] = &[
    533.078, 540.056, 585.249, 588.190, 594.483, 597.553, 602.000, 607.434, 609.616, 614.306,
    616.359, 621.728, 626.650, 630.479, 633.443, 638.299, 640.225, 650.653, 653.288, 659.895,
    667.828, 671.704, 692.947, 703.241, 717.394, 724.517, 743.890, 747.244, 748.887, 753.577,
    754.404,
];

const ARGON: &[f64] = &[
    696.543, 706.722, 714.704, 727.294, 738.398, 750.387, 751.465, 763.511, 772.376, 794.818,
    800.616, 801.479, 810.369, 811.531, 826.452, 840.821, 842.465, 852.144,
];

const MERCURY: &[f64] = &[404.656, 435.833, 546.074, 576.960, 579.066];

const KRYPTON: &[f64] = &[
    427.397, 431.958, 435.548, 437.612, 446.369, 557.029, 587.092, 760.155, 768.525, 769.454,
    785.482, 805.950, 810.436, 811.290, 819.006, 826.324, 829.811,
];

const XENON: &[f64] = &[
    462.420, 467.123, 823.163, 828.012, 834.682, 840.919, 881.941, 895.225,
];

/// Built-in materials in advertised order.
pub static LINE_LISTS: [LineList; 5] = [
    LineList {
        name: "Ne",
        lines: NEON,
    },
    LineList {
        name: "Ar",
        lines: ARGON,
    },
    LineList {
        name: "Hg",
        lines: MERCURY,
    },
    LineList {
        name: "Kr",
        lines: KRYPTON,
    },
    LineList {
        name: "Xe",
        lines: XENON,
    },
];

/// Line list for a material name.
#[must_use]
pub fn line_list(name: &str) -> Option<&'static LineList> {
    LINE_LISTS.iter().find(|l| l.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_lists_ascending() {
        for list in &LINE_LISTS {
            assert!(
                list.lines.windows(2).all(|w| w[0] < w[1]),
                "{} not ascending",
                list.name
            );
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(line_list("Hg").unwrap().lines.len(), 5);
        assert!(line_list("hg").is_none());
    }
}
