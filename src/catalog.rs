// src/catalog.rs
use serde::Serialize;
use strum_macros::{Display, EnumString};
use thiserror::Error;

/// Key of the program the client opens on.
pub const DEFAULT_PROGRAM_KEY: &str = "push";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Program not found: '{0}'")]
    NotFound(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExerciseKind {
    Standard,
    Weigh, // Bodyweight check-in, weight is the measurement
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub name: &'static str,
    pub sets: u32,
    pub reps_spec: &'static str, // Free-form, e.g. "8-10, 15" or "Failure"
    pub rest_seconds: u32,       // 0 = not applicable
    pub kind: ExerciseKind,
}

impl Exercise {
    const fn standard(name: &'static str, sets: u32, reps_spec: &'static str, rest_seconds: u32) -> Self {
        Self {
            name,
            sets,
            reps_spec,
            rest_seconds,
            kind: ExerciseKind::Standard,
        }
    }

    #[must_use]
    pub const fn has_rest(&self) -> bool {
        self.rest_seconds > 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub key: &'static str,
    pub display_name: &'static str,
    pub icon: &'static str,
    pub exercises: &'static [Exercise],
}

impl Program {
    /// Resolves an exercise by name (case-insensitive) or by 1-based position.
    #[must_use]
    pub fn exercise(&self, name_or_index: &str) -> Option<&'static Exercise> {
        let trimmed = name_or_index.trim();
        if trimmed.is_empty() {
            return None;
        }
        let exercises = self.exercises;
        if let Ok(index) = trimmed.parse::<usize>() {
            return index.checked_sub(1).and_then(|i| exercises.get(i));
        }
        exercises
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(trimmed))
    }
}

static PROGRAMS: &[Program] = &[
    Program {
        key: "weigh",
        display_name: "Weigh In",
        icon: "⚖️",
        exercises: &[Exercise {
            name: "Morning Weight",
            sets: 1,
            reps_spec: "1",
            rest_seconds: 0,
            kind: ExerciseKind::Weigh,
        }],
    },
    Program {
        key: "push",
        display_name: "Push Day",
        icon: "💪",
        exercises: &[
            Exercise::standard("Dumbbell Incline Chest Press", 2, "8-10, 15", 90),
            Exercise::standard("Machine Chest Press", 3, "10-12", 90),
            Exercise::standard("Low to High Cable Fly", 3, "15 + DS", 60),
            Exercise::standard("Feet Elevated Push Up", 2, "Failure", 60),
        ],
    },
    Program {
        key: "pull",
        display_name: "Pull Day",
        icon: "🔙",
        exercises: &[
            Exercise::standard("T-Bar Row", 3, "10-12", 90),
            Exercise::standard("Lat Pulldown", 3, "8-10, 10-12", 60),
            Exercise::standard("Single Arm Pulldown", 3, "12-15/side", 60),
            Exercise::standard("Prone Incline DB Row", 4, "10-12 + DS", 60),
        ],
    },
    Program {
        key: "legs",
        display_name: "Leg Day",
        icon: "🦵",
        exercises: &[
            Exercise::standard("Seated Hamstring Curl", 4, "15/12/12/8", 90),
            Exercise::standard("Bulgarian Split Squat", 3, "8-12/side", 60),
            Exercise::standard("Hack Squat", 4, "15/12/6/20", 90),
            Exercise::standard("Alternating Lunge Barbell", 3, "10-12/side", 60),
        ],
    },
    Program {
        key: "shoulders",
        display_name: "Shoulders + Arms",
        icon: "💪",
        exercises: &[
            Exercise::standard("Seated Shoulder Press", 3, "10/15/15", 60),
            Exercise::standard("Dumbbell Side Lateral Raise", 4, "10-12", 60),
            Exercise::standard("Machine Preacher Curl", 3, "10-15", 60),
            Exercise::standard("Cross Body Tricep Extension", 3, "10-15", 60),
            Exercise::standard("Low Pulley Cable Curl", 3, "10-12", 60),
        ],
    },
];

/// Read-only registry of workout programs, in definition order.
#[derive(Debug, Clone, Copy)]
pub struct ProgramCatalog {
    programs: &'static [Program],
}

impl Default for ProgramCatalog {
    fn default() -> Self {
        Self::reference()
    }
}

impl ProgramCatalog {
    /// The built-in catalog: Weigh In, Push, Pull, Legs, Shoulders + Arms.
    #[must_use]
    pub const fn reference() -> Self {
        Self { programs: PROGRAMS }
    }

    /// Lists `(key, program)` pairs in catalog order. Stable across calls.
    pub fn list_programs(&self) -> impl Iterator<Item = (&'static str, &'static Program)> {
        let programs = self.programs;
        programs.iter().map(|p| (p.key, p))
    }

    /// # Errors
    /// Returns `CatalogError::NotFound` if no program has the given key.
    pub fn get_program(&self, key: &str) -> Result<&'static Program, CatalogError> {
        let programs = self.programs;
        programs
            .iter()
            .find(|p| p.key == key)
            .ok_or_else(|| CatalogError::NotFound(key.to_string()))
    }

    #[must_use]
    pub fn default_program(&self) -> &'static Program {
        let programs = self.programs;
        self.get_program(DEFAULT_PROGRAM_KEY)
            .unwrap_or(&programs[0])
    }
}
