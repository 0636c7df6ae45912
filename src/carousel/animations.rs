//! Entry/exit animation catalogs (animate.css class names).
//!
//! The runtime only honors these when a single item is visible.

use tracing::debug;

/// Which transition slot an animation name is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationPhase {
    Entry,
    Exit,
}

/// Named group of animations, as shown in the picker.
#[derive(Debug, Clone, Copy)]
pub struct AnimationGroup {
    pub label: &'static str,
    pub animations: &'static [(&'static str, &'static str)],
}

pub static ENTRY_ANIMATIONS: &[AnimationGroup] = &[
    AnimationGroup {
        label: "Fading",
        animations: &[
            ("fadeIn", "Fade In"),
            ("fadeInDown", "Fade In Down"),
            ("fadeInLeft", "Fade In Left"),
            ("fadeInRight", "Fade In Right"),
            ("fadeInUp", "Fade In Up"),
        ],
    },
    AnimationGroup {
        label: "Zooming",
        animations: &[
            ("zoomIn", "Zoom In"),
            ("zoomInDown", "Zoom In Down"),
            ("zoomInLeft", "Zoom In Left"),
            ("zoomInRight", "Zoom In Right"),
            ("zoomInUp", "Zoom In Up"),
        ],
    },
    AnimationGroup {
        label: "Bouncing",
        animations: &[
            ("bounceIn", "Bounce In"),
            ("bounceInDown", "Bounce In Down"),
            ("bounceInLeft", "Bounce In Left"),
            ("bounceInRight", "Bounce In Right"),
            ("bounceInUp", "Bounce In Up"),
        ],
    },
    AnimationGroup {
        label: "Sliding",
        animations: &[
            ("slideInDown", "Slide In Down"),
            ("slideInLeft", "Slide In Left"),
            ("slideInRight", "Slide In Right"),
            ("slideInUp", "Slide In Up"),
        ],
    },
    AnimationGroup {
        label: "Rotating",
        animations: &[
            ("rotateIn", "Rotate In"),
            ("rotateInDownLeft", "Rotate In Down Left"),
            ("rotateInDownRight", "Rotate In Down Right"),
            ("rotateInUpLeft", "Rotate In Up Left"),
            ("rotateInUpRight", "Rotate In Up Right"),
        ],
    },
    AnimationGroup {
        label: "Attention Seekers",
        animations: &[
            ("bounce", "Bounce"),
            ("flash", "Flash"),
            ("pulse", "Pulse"),
            ("rubberBand", "Rubber Band"),
            ("shake", "Shake"),
            ("headShake", "Head Shake"),
            ("swing", "Swing"),
            ("tada", "Tada"),
            ("wobble", "Wobble"),
            ("jello", "Jello"),
        ],
    },
    AnimationGroup {
        label: "Light Speed",
        animations: &[("lightSpeedIn", "Light Speed In")],
    },
    AnimationGroup {
        label: "Specials",
        animations: &[("rollIn", "Roll In")],
    },
];

pub static EXIT_ANIMATIONS: &[AnimationGroup] = &[
    AnimationGroup {
        label: "Fading",
        animations: &[
            ("fadeOut", "Fade Out"),
            ("fadeOutLeft", "Fade Out Left"),
            ("fadeOutRight", "Fade Out Right"),
            ("fadeOutDown", "Fade Out Down"),
            ("fadeOutUp", "Fade Out Up"),
        ],
    },
    AnimationGroup {
        label: "Zooming",
        animations: &[
            ("zoomOut", "Zoom Out"),
            ("zoomOutLeft", "Zoom Out Left"),
            ("zoomOutRight", "Zoom Out Right"),
            ("zoomOutUp", "Zoom Out Up"),
            ("zoomOutDown", "Zoom Out Down"),
        ],
    },
    AnimationGroup {
        label: "Sliding",
        animations: &[
            ("slideOutLeft", "Slide Out Left"),
            ("slideOutRight", "Slide Out Right"),
            ("slideOutUp", "Slide Out Up"),
            ("slideOutDown", "Slide Out Down"),
        ],
    },
    AnimationGroup {
        label: "Rotating",
        animations: &[
            ("rotateOut", "Rotate Out"),
            ("rotateOutUpLeft", "Rotate Out Up Left"),
            ("rotateOutUpRight", "Rotate Out Up Right"),
            ("rotateOutDownLeft", "Rotate Out Down Left"),
            ("rotateOutDownRight", "Rotate Out Down Right"),
        ],
    },
    AnimationGroup {
        label: "Light Speed",
        animations: &[("lightSpeedOut", "Light Speed Out")],
    },
    AnimationGroup {
        label: "Specials",
        animations: &[("rollOut", "Roll Out")],
    },
];

impl AnimationPhase {
    pub fn catalog(self) -> &'static [AnimationGroup] {
        match self {
            Self::Entry => ENTRY_ANIMATIONS,
            Self::Exit => EXIT_ANIMATIONS,
        }
    }

    /// Control type the host uses for this picker.
    pub const fn control_type(self) -> &'static str {
        match self {
            Self::Entry => "animation",
            Self::Exit => "exit_animation",
        }
    }

    pub fn contains(self, name: &str) -> bool {
        self.catalog()
            .iter()
            .flat_map(|g| g.animations.iter())
            .any(|(id, _)| *id == name)
    }

    /// Flat `(id, label)` list across all groups, in catalog order.
    pub fn choices(self) -> impl Iterator<Item = (&'static str, &'static str)> {
        self.catalog()
            .iter()
            .flat_map(|g| g.animations.iter().copied())
    }
}

/// Normalize a stored animation name: empty or `none` means no animation.
///
/// Names outside the built-in catalog are kept; the host lets other plugins add
/// their own.
pub fn normalize(phase: AnimationPhase, name: Option<&str>) -> Option<String> {
    let name = name.map(str::trim).filter(|n| !n.is_empty() && *n != "none")?;
    if !phase.contains(name) {
        debug!(target: "owce::carousel", ?phase, %name, "Animation not in built-in catalog");
    }
    Some(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_lookup() {
        assert!(AnimationPhase::Entry.contains("fadeIn"));
        assert!(!AnimationPhase::Entry.contains("fadeOut"));
        assert!(AnimationPhase::Exit.contains("rollOut"));
    }

    #[test]
    fn none_and_empty_normalize_to_absent() {
        assert_eq!(normalize(AnimationPhase::Entry, None), None);
        assert_eq!(normalize(AnimationPhase::Entry, Some("")), None);
        assert_eq!(normalize(AnimationPhase::Exit, Some("none")), None);
        assert_eq!(
            normalize(AnimationPhase::Entry, Some("zoomIn")),
            Some("zoomIn".to_string())
        );
        assert_eq!(
            normalize(AnimationPhase::Entry, Some("customIn")),
            Some("customIn".to_string())
        );
    }
}
