// ABOUTME: Anatomical token classifier mapping raw mesh labels to muscle-group sets
// ABOUTME: Ordered rules: suppression, shell, micro-anatomy reject, muscle gate, group match
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Anatomical Token Classifier
//!
//! Deterministically classifies a raw identifier string (anatomical mesh
//! label or similar free-text tag) into ignore / shell / trainable, plus the
//! set of muscle-group ids for trainable items. Anatomical naming varies
//! wildly between sources, so matching is substring-token based on a
//! normalized form of the label.
//!
//! Rule ordering is load-bearing: the micro-anatomy reject list must run
//! before the muscle gate, and the gate before the broad fallback, or
//! bones, vessels and hand intrinsics leak through as trainable.
//!
//! A label may legitimately match several overlapping groups (a deltoid
//! mesh maps to `shoulders` and each delt sub-region); downstream consumers
//! take the maximum heat across matched groups.

use serde::{Deserialize, Serialize};

/// Classification of one raw anatomical label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Classification {
    /// Not relevant to training: micro-anatomy, bones, organs, vessels
    Ignore,
    /// Non-muscle surface (skin, fascia); rendered but never interactive
    Shell,
    /// Trainable muscle; `groups` may be empty when recognized as muscle but
    /// unmapped (remains interactive, contributes no load)
    Trainable {
        /// All muscle-group ids whose token list matched the label
        groups: Vec<String>,
    },
}

/// One semantic muscle group and the substring tokens that identify it
#[derive(Debug, Clone, Copy)]
pub struct GroupDef {
    /// Stable group identifier, e.g. `chest`
    pub id: &'static str,
    /// Human-readable label for UI and coaching messages
    pub label: &'static str,
    /// Normalized substring tokens that map a label into this group
    pub tokens: &'static [&'static str],
}

/// All known muscle groups, ported from the anatomical model's naming
pub const GROUPS: &[GroupDef] = &[
    GroupDef {
        id: "abs_upper",
        label: "Abs (upper)",
        tokens: &["rectus abdominis"],
    },
    GroupDef {
        id: "abs_lower",
        label: "Abs (lower)",
        tokens: &["rectus abdominis"],
    },
    GroupDef {
        id: "obliques_external",
        label: "Obliques (external)",
        tokens: &["external abdominal oblique"],
    },
    GroupDef {
        id: "obliques_internal",
        label: "Obliques (internal)",
        tokens: &["internal abdominal oblique"],
    },
    GroupDef {
        id: "core_deep",
        label: "Deep core (TVA)",
        tokens: &["transversus abdominis"],
    },
    GroupDef {
        id: "chest",
        label: "Chest",
        tokens: &["pectoralis major", "pectoralis minor"],
    },
    GroupDef {
        id: "lats",
        label: "Lats",
        tokens: &["latissimus dorsi"],
    },
    GroupDef {
        id: "upper_back",
        label: "Upper back",
        tokens: &[
            "trapezius",
            "rhomboid",
            "teres major",
            "teres minor",
            "infraspinatus",
            "supraspinatus",
        ],
    },
    GroupDef {
        id: "mid_back",
        label: "Mid back",
        tokens: &["serratus posterior", "erector spinae"],
    },
    GroupDef {
        id: "lower_back",
        label: "Lower back",
        tokens: &[
            "multifidus thoracis",
            "multifidus lumborum",
            "quadratus lumborum",
        ],
    },
    GroupDef {
        id: "shoulders",
        label: "Shoulders",
        tokens: &["deltoid"],
    },
    GroupDef {
        id: "front_delts",
        label: "Front delts",
        tokens: &["deltoid"],
    },
    GroupDef {
        id: "side_delts",
        label: "Side delts",
        tokens: &["deltoid"],
    },
    GroupDef {
        id: "rear_delts",
        label: "Rear delts",
        tokens: &["deltoid"],
    },
    GroupDef {
        id: "biceps",
        label: "Biceps",
        tokens: &["biceps brachii", "brachialis"],
    },
    GroupDef {
        id: "triceps",
        label: "Triceps",
        tokens: &["triceps brachii"],
    },
    GroupDef {
        id: "forearms",
        label: "Forearms",
        tokens: &["brachioradialis", "flexor carpi", "extensor carpi"],
    },
    GroupDef {
        id: "quads",
        label: "Quads",
        tokens: &[
            "rectus femoris",
            "vastus lateralis",
            "vastus medialis",
            "vastus intermedius",
        ],
    },
    GroupDef {
        id: "hamstrings",
        label: "Hamstrings",
        tokens: &["biceps femoris", "semitendinosus", "semimembranosus"],
    },
    GroupDef {
        id: "glutes",
        label: "Glutes",
        tokens: &["gluteus maximus", "gluteus medius", "gluteus minimus"],
    },
    GroupDef {
        id: "calves",
        label: "Calves",
        tokens: &["gastrocnemius", "soleus"],
    },
    GroupDef {
        id: "upper_traps",
        label: "Upper traps",
        tokens: &["trapezius"],
    },
    GroupDef {
        id: "posterior_chain",
        label: "Posterior chain",
        tokens: &["erector spinae", "gluteus", "hamstring"],
    },
    GroupDef {
        id: "core",
        label: "Core",
        tokens: &[
            "rectus abdominis",
            "external abdominal oblique",
            "internal abdominal oblique",
            "transversus abdominis",
        ],
    },
];

/// Sub-groups hidden by default (visual noise; rectus is the trained muscle)
const SUPPRESSED_TOKENS: &[&str] = &["external abdominal oblique", "internal abdominal oblique"];

/// Non-muscle surface tokens
const SHELL_TOKENS: &[&str] = &["superficial", "skin", "fascia"];

/// Micro-anatomy that must never become interactive gym muscles
const MICRO_REJECT: &[&str] = &[
    // face / neck / larynx
    "orbicularis",
    "nasalis",
    "frontalis",
    "buccinator",
    "masseter",
    "temporalis",
    "platysma",
    "digastric",
    "mylohyoid",
    "geniohyoid",
    "sternohyoid",
    "omohyoid",
    "thyrohyoid",
    "crico",
    "aryten",
    "laryn",
    "pharyn",
    "tongue",
    "hyoid",
    // hands / feet intrinsics
    "interosse",
    "lumbrical",
    "thenar",
    "hypothenar",
    "palmaris brevis",
    "abductor digiti",
    "opponens",
    "flexor pollicis",
    "extensor pollicis",
    "retinaculum",
    "tarsal",
    "plantar",
];

/// Broad muscle tokens used by the gate and the fallback guess
const BIG_MUSCLE_TOKENS: &[&str] = &[
    "pectoralis",
    "deltoid",
    "biceps",
    "triceps",
    "latissimus",
    "trapezius",
    "rhomboid",
    "rectus abdominis",
    "oblique",
    "gluteus",
    "vastus",
    "rectus femoris",
    "gastrocnemius",
    "soleus",
    "biceps femoris",
    "semitendinosus",
    "semimembranosus",
    "erector spinae",
    "quadratus lumborum",
];

/// Ordered narrow-guess table for labels that only hit a broad token.
/// Compound tokens come before their prefixes (`biceps femoris` vs `biceps`).
const FALLBACK_GUESSES: &[(&str, &str)] = &[
    ("biceps femoris", "hamstrings"),
    ("semitendinosus", "hamstrings"),
    ("semimembranosus", "hamstrings"),
    ("pectoralis", "chest"),
    ("deltoid", "shoulders"),
    ("latissimus", "lats"),
    ("trapezius", "upper_back"),
    ("rhomboid", "upper_back"),
    ("triceps", "triceps"),
    ("biceps", "biceps"),
    ("rectus femoris", "quads"),
    ("vastus", "quads"),
    ("gastrocnemius", "calves"),
    ("soleus", "calves"),
    ("gluteus", "glutes"),
    ("erector spinae", "mid_back"),
    ("quadratus lumborum", "lower_back"),
    ("rectus abdominis", "core"),
    ("oblique", "core"),
];

/// Classifier configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Suppress oblique sub-group meshes entirely
    pub hide_obliques: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self { hide_obliques: true }
    }
}

/// Anatomical label classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct Classifier {
    config: ClassifierConfig,
}

impl Classifier {
    /// Create a classifier with the given configuration
    #[must_use]
    pub const fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Classify a raw anatomical label
    #[must_use]
    pub fn classify(&self, raw_label: &str) -> Classification {
        let name = normalize(raw_label);
        if name.is_empty() {
            return Classification::Ignore;
        }

        if self.config.hide_obliques && contains_any(&name, SUPPRESSED_TOKENS) {
            return Classification::Ignore;
        }

        let is_muscle = has_muscle_token(&name);
        if contains_any(&name, SHELL_TOKENS) && !is_muscle {
            return Classification::Shell;
        }
        if contains_any(&name, MICRO_REJECT) {
            return Classification::Ignore;
        }
        if !is_muscle {
            return Classification::Ignore;
        }

        // Group matching is exhaustive: a label may belong to several groups.
        let groups: Vec<String> = GROUPS
            .iter()
            .filter(|group| contains_any(&name, group.tokens))
            .map(|group| group.id.to_owned())
            .collect();
        if !groups.is_empty() {
            return Classification::Trainable { groups };
        }

        if contains_any(&name, BIG_MUSCLE_TOKENS) {
            for (token, group_id) in FALLBACK_GUESSES {
                if name.contains(token) {
                    return Classification::Trainable {
                        groups: vec![(*group_id).to_owned()],
                    };
                }
            }
        }

        Classification::Trainable { groups: Vec::new() }
    }
}

/// All known group ids, in declaration order
#[must_use]
pub fn known_group_ids() -> Vec<&'static str> {
    GROUPS.iter().map(|group| group.id).collect()
}

/// UI label for a group id
#[must_use]
pub fn group_label(group_id: &str) -> Option<&'static str> {
    GROUPS
        .iter()
        .find(|group| group.id == group_id)
        .map(|group| group.label)
}

/// Normalize a raw label: camel-case boundaries and separators become single
/// spaces, everything lowercased
fn normalize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 8);
    let mut prev: Option<char> = None;
    for ch in raw.chars() {
        if matches!(ch, '_' | '-' | '.' | '/' | '\\') || ch.is_whitespace() {
            push_space(&mut out);
            prev = None;
            continue;
        }
        if ch.is_uppercase() {
            if let Some(p) = prev {
                if p.is_lowercase() || p.is_ascii_digit() {
                    push_space(&mut out);
                }
            }
        }
        out.extend(ch.to_lowercase());
        prev = Some(ch);
    }
    out.trim_end().to_owned()
}

fn push_space(out: &mut String) {
    if !out.is_empty() && !out.ends_with(' ') {
        out.push(' ');
    }
}

fn contains_any(name: &str, tokens: &[&str]) -> bool {
    tokens.iter().any(|token| name.contains(token))
}

/// Whether the normalized name names a muscle at all: the literal `muscle`
/// marker the anatomical model uses, any group token, or any broad token
fn has_muscle_token(name: &str) -> bool {
    name.contains("muscle")
        || GROUPS.iter().any(|group| contains_any(name, group.tokens))
        || contains_any(name, BIG_MUSCLE_TOKENS)
}
