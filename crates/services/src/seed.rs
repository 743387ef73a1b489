//! Built-in program catalog and idempotent seeding.

use storage::repository::ProgramRepository;
use tracing::info;
use workout_core::model::{ExerciseDraft, ProgramDraft, ProgramId, WorkoutDayDraft};

use crate::error::SeedError;

#[derive(Debug)]
pub struct ProgramSeed {
    pub name: &'static str,
    pub description: &'static str,
    pub duration: &'static str,
    pub days: &'static [DaySeed],
}

#[derive(Debug)]
pub struct DaySeed {
    pub name: &'static str,
    pub focus: &'static str,
    pub notes: &'static str,
    pub exercises: &'static [ExerciseSeed],
}

#[derive(Debug)]
pub struct ExerciseSeed {
    pub name: &'static str,
    pub description: &'static str,
    pub sets: u32,
    pub reps: &'static str,
    pub muscles_worked: &'static str,
    pub how_to_do: &'static str,
}

impl ProgramSeed {
    #[must_use]
    pub fn exercise_count(&self) -> usize {
        self.days.iter().map(|d| d.exercises.len()).sum()
    }
}

/// What a seeding run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Created {
        program_id: ProgramId,
        days: usize,
        exercises: usize,
    },
    AlreadyPresent {
        program_id: ProgramId,
    },
}

impl SeedOutcome {
    #[must_use]
    pub fn program_id(&self) -> ProgramId {
        match self {
            Self::Created { program_id, .. } | Self::AlreadyPresent { program_id } => *program_id,
        }
    }
}

/// Insert `seed` unless a program with the same name exists.
///
/// Days and exercises take their `order` from their position, starting at 1.
///
/// # Errors
///
/// Returns `SeedError` if catalog data fails validation or storage fails.
pub async fn seed_program(
    programs: &dyn ProgramRepository,
    seed: &ProgramSeed,
) -> Result<SeedOutcome, SeedError> {
    if let Some(existing) = programs.find_program_by_name(seed.name).await? {
        info!(program = seed.name, program_id = %existing.id, "program already seeded");
        return Ok(SeedOutcome::AlreadyPresent {
            program_id: existing.id,
        });
    }

    let program_id = programs
        .insert_program(
            ProgramDraft {
                name: seed.name.to_owned(),
                description: Some(seed.description.to_owned()),
                duration: Some(seed.duration.to_owned()),
            }
            .validate()?,
        )
        .await?;

    for (day_order, day) in (1u32..).zip(seed.days) {
        let day_id = programs
            .insert_day(
                WorkoutDayDraft {
                    program_id,
                    name: day.name.to_owned(),
                    focus: Some(day.focus.to_owned()),
                    notes: Some(day.notes.to_owned()),
                    order: day_order,
                }
                .validate()?,
            )
            .await?;

        for (order, exercise) in (1u32..).zip(day.exercises) {
            programs
                .insert_exercise(
                    ExerciseDraft {
                        day_id,
                        name: exercise.name.to_owned(),
                        description: Some(exercise.description.to_owned()),
                        sets: exercise.sets,
                        reps: exercise.reps.to_owned(),
                        order,
                        muscles_worked: Some(exercise.muscles_worked.to_owned()),
                        how_to_do: Some(exercise.how_to_do.to_owned()),
                    }
                    .validate()?,
                )
                .await?;
        }
    }

    let outcome = SeedOutcome::Created {
        program_id,
        days: seed.days.len(),
        exercises: seed.exercise_count(),
    };
    info!(program = seed.name, %program_id, ?outcome, "seeded program");
    Ok(outcome)
}

/// Seed the built-in program.
///
/// # Errors
///
/// See [`seed_program`].
pub async fn seed_default_program(
    programs: &dyn ProgramRepository,
) -> Result<SeedOutcome, SeedError> {
    seed_program(programs, default_program()).await
}

#[must_use]
pub fn default_program() -> &'static ProgramSeed {
    &STRONGHER_BUILD
}

static STRONGHER_BUILD: ProgramSeed = ProgramSeed {
    name: "STRONGHER Build",
    description: "6-Week Full Body Progressive Overload Programme for women (35yo, beginner-intermediate)",
    duration: "6 weeks",
    days: &[
        DaySeed {
            name: "Day 1",
            focus: "Posterior Chain Strength",
            notes: "Glute + hamstring focus",
            exercises: &[
                ExerciseSeed {
                    name: "Barbell Romanian Deadlift",
                    description: "Hinge movement; targets hamstrings and glutes. Keep a flat back and slight knee bend.",
                    sets: 3,
                    reps: "8",
                    muscles_worked: "Hamstrings, glutes, lower back",
                    how_to_do: "Stand with feet hip-width apart, hold barbell in front of thighs. Hinge at hips, keeping back flat, and lower bar down legs. Return to standing by driving hips forward.",
                },
                ExerciseSeed {
                    name: "Front Foot Elevated Split Squat",
                    description: "Quad/glute focus. Elevate front foot 2–3 inches, keep chest up, and descend under control.",
                    sets: 3,
                    reps: "10/leg",
                    muscles_worked: "Quads, glutes, hamstrings",
                    how_to_do: "Place front foot on elevated surface (2-3 inches). Step back into split stance. Lower back knee toward ground while keeping front knee over toes. Drive back up through front foot.",
                },
                ExerciseSeed {
                    name: "Lat Pulldown",
                    description: "Wide grip; engage lats and mid-back. Pull bar to chest.",
                    sets: 3,
                    reps: "10",
                    muscles_worked: "Lats, rhomboids, biceps",
                    how_to_do: "Sit with thighs secured under pads. Grasp bar with wide grip. Pull bar down to upper chest while keeping chest up and elbows down. Control the return.",
                },
                ExerciseSeed {
                    name: "Glute-Focused Step-Ups",
                    description: "Use a high box. Drive through heel. Glute activation peak at top.",
                    sets: 2,
                    reps: "10–12/leg",
                    muscles_worked: "Glutes, quads, hamstrings",
                    how_to_do: "Place one foot on elevated surface (knee height). Drive through heel to step up, keeping chest up. Control the descent. Focus on glute activation at the top.",
                },
                ExerciseSeed {
                    name: "Hanging Leg Raises",
                    description: "Controlled core exercise. Avoid swinging.",
                    sets: 3,
                    reps: "12",
                    muscles_worked: "Abs, hip flexors",
                    how_to_do: "Hang from pull-up bar. Raise legs to parallel or higher while keeping them straight. Control the descent. Avoid swinging or using momentum.",
                },
            ],
        },
        DaySeed {
            name: "Day 2",
            focus: "Compound Glutes + Power",
            notes: "Hip thrust + deadlift priority",
            exercises: &[
                ExerciseSeed {
                    name: "Barbell Hip Thrust",
                    description: "Strongest glute builder. Use bar pad, chin tucked. Full lockout at top.",
                    sets: 4,
                    reps: "6–8",
                    muscles_worked: "Glutes, hamstrings, core",
                    how_to_do: "Sit on ground with upper back against bench. Place barbell across hips with pad. Drive hips up to full lockout, squeezing glutes at top. Control the descent.",
                },
                ExerciseSeed {
                    name: "Trap Bar Deadlift",
                    description: "Safe hinge for strength. Focus on leg drive and glute finish.",
                    sets: 3,
                    reps: "6",
                    muscles_worked: "Glutes, hamstrings, quads, back",
                    how_to_do: "Stand inside trap bar with feet hip-width apart. Hinge at hips and grasp handles. Drive through feet to stand up, keeping bar close to body. Control the descent.",
                },
                ExerciseSeed {
                    name: "Dumbbell Bench Press",
                    description: "Horizontal press. Keep wrists neutral. Control the negative.",
                    sets: 3,
                    reps: "10",
                    muscles_worked: "Chest, triceps, shoulders",
                    how_to_do: "Lie on bench with dumbbells at chest level. Press up to full extension, keeping wrists neutral. Control the descent back to chest.",
                },
                ExerciseSeed {
                    name: "Kettlebell Goblet Squat",
                    description: "Quad + core. Hold KB at chest. Sit deep. Elbows inside knees.",
                    sets: 3,
                    reps: "12",
                    muscles_worked: "Quads, glutes, core",
                    how_to_do: "Hold kettlebell at chest level. Squat down, keeping elbows inside knees. Sit deep, then drive back up through heels.",
                },
                ExerciseSeed {
                    name: "Side Plank with Reach",
                    description: "Core + oblique stability. Thread arm under and return with control.",
                    sets: 2,
                    reps: "30s/side",
                    muscles_worked: "Obliques, core, shoulders",
                    how_to_do: "Hold side plank position. Thread top arm under body and return with control. Maintain stable position throughout.",
                },
            ],
        },
        DaySeed {
            name: "Day 3",
            focus: "Athletic & Unilateral",
            notes: "Functional + total-body finishers",
            exercises: &[
                ExerciseSeed {
                    name: "Walking Lunges with Dumbbells",
                    description: "Glute + quad + balance. Keep torso upright and step long.",
                    sets: 3,
                    reps: "10/leg",
                    muscles_worked: "Glutes, quads, hamstrings, core",
                    how_to_do: "Hold dumbbells at sides. Step forward into lunge, keeping torso upright. Drive back up and step forward with opposite leg. Continue walking pattern.",
                },
                ExerciseSeed {
                    name: "Dumbbell Single-Leg RDL",
                    description: "Hinge + balance. Hips square. Feel stretch in hamstrings.",
                    sets: 3,
                    reps: "8/leg",
                    muscles_worked: "Hamstrings, glutes, core",
                    how_to_do: "Stand on one leg, hold dumbbells. Hinge at hips, keeping back flat. Lower weights down leg while lifting back leg. Return to standing.",
                },
                ExerciseSeed {
                    name: "Push Press or Landmine Press",
                    description: "Powerful vertical press. Use lower body to assist.",
                    sets: 3,
                    reps: "8",
                    muscles_worked: "Shoulders, triceps, legs",
                    how_to_do: "Hold barbell at shoulder level. Dip slightly with legs, then drive up with legs and press bar overhead. Control the descent.",
                },
                ExerciseSeed {
                    name: "Seated Row Machine",
                    description: "Back/rear delts. Full range. Avoid shrugging.",
                    sets: 3,
                    reps: "12",
                    muscles_worked: "Lats, rhomboids, rear delts",
                    how_to_do: "Sit with chest against pad. Pull handles to chest, squeezing shoulder blades together. Control the return without shrugging.",
                },
                ExerciseSeed {
                    name: "Cable Pallof Press",
                    description: "Anti-rotation core drill. Keep arms straight, resist twist.",
                    sets: 2,
                    reps: "12/side",
                    muscles_worked: "Core, obliques, shoulders",
                    how_to_do: "Stand sideways to cable machine. Hold cable at chest level. Press straight out, resisting rotation. Return with control.",
                },
            ],
        },
        DaySeed {
            name: "Bonus Day",
            focus: "Glute, Abs & Arm Pump",
            notes: "Optional higher-rep finisher session",
            exercises: &[
                ExerciseSeed {
                    name: "Glute Bridge March on Bench",
                    description: "Glutes + stability. Keep hips up, alternate legs.",
                    sets: 2,
                    reps: "20 total",
                    muscles_worked: "Glutes, hamstrings, core",
                    how_to_do: "Lie on bench with feet on ground. Bridge hips up and hold. March legs up and down while maintaining bridge position.",
                },
                ExerciseSeed {
                    name: "Banded Lateral Walks",
                    description: "Glute medius activation. Maintain band tension.",
                    sets: 2,
                    reps: "30 steps",
                    muscles_worked: "Glute medius, quads",
                    how_to_do: "Place resistance band around thighs. Step sideways while maintaining tension. Keep knees slightly bent and hips level.",
                },
                ExerciseSeed {
                    name: "Hammer Curl + Overhead Triceps Extension Superset",
                    description: "Arms-focused superset. Keep movement strict.",
                    sets: 3,
                    reps: "12 each",
                    muscles_worked: "Biceps, triceps",
                    how_to_do: "Perform hammer curls, then immediately do overhead triceps extensions. Rest between supersets.",
                },
                ExerciseSeed {
                    name: "Cable Crunches",
                    description: "Keep spine rounded, focus on abs not arms.",
                    sets: 3,
                    reps: "15",
                    muscles_worked: "Abs, obliques",
                    how_to_do: "Kneel facing cable machine. Hold cable behind head. Crunch forward, rounding spine. Focus on abs, not arm movement.",
                },
                ExerciseSeed {
                    name: "Optional Finisher (EMOM 6 min): 6 push-ups + 6 band pull-aparts",
                    description: "Upper body & shoulder burn.",
                    sets: 1,
                    reps: "6 minutes",
                    muscles_worked: "Chest, shoulders, upper back",
                    how_to_do: "Every minute on the minute: 6 push-ups followed by 6 band pull-aparts. Repeat for 6 minutes.",
                },
            ],
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    use storage::repository::InMemoryRepository;
    use workout_core::model::RepScheme;

    #[test]
    fn catalog_has_four_days_of_five_exercises() {
        let program = default_program();
        assert_eq!(program.days.len(), 4);
        assert_eq!(program.exercise_count(), 20);
        assert!(program.days.iter().all(|d| d.exercises.len() == 5));
    }

    #[test]
    fn every_catalog_rep_label_parses_to_a_known_shape() {
        for day in default_program().days {
            for exercise in day.exercises {
                assert!(
                    !matches!(RepScheme::parse(exercise.reps), RepScheme::Freeform(_)),
                    "{} has unparsed reps {:?}",
                    exercise.name,
                    exercise.reps
                );
            }
        }
    }

    #[tokio::test]
    async fn seeding_twice_is_a_no_op() {
        let repo = InMemoryRepository::new();
        let first = seed_default_program(&repo).await.unwrap();
        let second = seed_default_program(&repo).await.unwrap();

        assert!(matches!(
            first,
            SeedOutcome::Created {
                days: 4,
                exercises: 20,
                ..
            }
        ));
        assert_eq!(
            second,
            SeedOutcome::AlreadyPresent {
                program_id: first.program_id()
            }
        );
        assert_eq!(repo.list_programs().await.unwrap().len(), 1);
    }
}
