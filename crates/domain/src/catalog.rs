use crate::{Exercise, ExerciseID, MuscleGroup, MuscleGroupID, Percentage, RepRange, Time};

/// Number of exercises a generated workout consists of at most.
pub const WORKOUT_EXERCISE_LIMIT: usize = 4;

#[must_use]
pub fn muscle_groups() -> &'static [MuscleGroup] {
    &MUSCLE_GROUPS
}

#[must_use]
pub fn exercises() -> &'static [Exercise] {
    &EXERCISES
}

#[must_use]
pub fn muscle_group(id: &MuscleGroupID) -> Option<&'static MuscleGroup> {
    MUSCLE_GROUPS.iter().find(|g| g.id == *id)
}

#[must_use]
pub fn exercise(id: &ExerciseID) -> Option<&'static Exercise> {
    EXERCISES.iter().find(|e| e.id == *id)
}

/// Select the exercises of a workout for the given muscle group.
///
/// The first exercises of the group in catalog order are taken. An unknown
/// muscle group results in an empty workout.
#[must_use]
pub fn generate_workout(muscle_group_id: &MuscleGroupID) -> Vec<&'static Exercise> {
    EXERCISES
        .iter()
        .filter(|e| e.muscle_group_id == *muscle_group_id)
        .take(WORKOUT_EXERCISE_LIMIT)
        .collect()
}

struct BaseMuscleGroup {
    id: &'static str,
    name: &'static str,
    icon: &'static str,
    color: &'static str,
}

impl From<&BaseMuscleGroup> for MuscleGroup {
    fn from(value: &BaseMuscleGroup) -> Self {
        MuscleGroup {
            id: value.id.into(),
            name: value.name,
            icon: value.icon,
            color: value.color,
        }
    }
}

struct BaseExercise {
    id: &'static str,
    muscle_group: &'static str,
    name: &'static str,
    description: &'static str,
    sets: u32,
    reps: &'static str,
    rest: u32,
    percentage_of_max: u32,
}

impl From<&BaseExercise> for Exercise {
    fn from(value: &BaseExercise) -> Self {
        Exercise {
            id: value.id.into(),
            muscle_group_id: value.muscle_group.into(),
            name: value.name,
            description: value.description,
            sets: value.sets,
            reps: RepRange(value.reps),
            rest: Time(value.rest),
            percentage_of_max: Percentage(value.percentage_of_max),
        }
    }
}

static MUSCLE_GROUPS: std::sync::LazyLock<Vec<MuscleGroup>> =
    std::sync::LazyLock::new(|| BASE_MUSCLE_GROUPS.iter().map(Into::into).collect());

static EXERCISES: std::sync::LazyLock<Vec<Exercise>> =
    std::sync::LazyLock::new(|| BASE_EXERCISES.iter().map(Into::into).collect());

const BASE_MUSCLE_GROUPS: [BaseMuscleGroup; 6] = [
    BaseMuscleGroup {
        id: "chest",
        name: "Chest",
        icon: "💪",
        color: "hsl(24 100% 50%)",
    },
    BaseMuscleGroup {
        id: "back",
        name: "Back",
        icon: "🔙",
        color: "hsl(200 100% 50%)",
    },
    BaseMuscleGroup {
        id: "shoulders",
        name: "Shoulders",
        icon: "🎯",
        color: "hsl(280 100% 60%)",
    },
    BaseMuscleGroup {
        id: "legs",
        name: "Legs",
        icon: "🦵",
        color: "hsl(120 70% 45%)",
    },
    BaseMuscleGroup {
        id: "arms",
        name: "Arms",
        icon: "💪",
        color: "hsl(340 80% 55%)",
    },
    BaseMuscleGroup {
        id: "core",
        name: "Core",
        icon: "🔥",
        color: "hsl(45 100% 50%)",
    },
];

const BASE_EXERCISES: [BaseExercise; 24] = [
    // Chest
    BaseExercise {
        id: "bench-press",
        muscle_group: "chest",
        name: "Bench Press",
        description: "Classic barbell chest exercise",
        sets: 4,
        reps: "8-10",
        rest: 90,
        percentage_of_max: 75,
    },
    BaseExercise {
        id: "incline-press",
        muscle_group: "chest",
        name: "Incline Dumbbell Press",
        description: "Upper chest focus",
        sets: 3,
        reps: "10-12",
        rest: 75,
        percentage_of_max: 70,
    },
    BaseExercise {
        id: "cable-fly",
        muscle_group: "chest",
        name: "Cable Fly",
        description: "Isolation for chest definition",
        sets: 3,
        reps: "12-15",
        rest: 60,
        percentage_of_max: 50,
    },
    BaseExercise {
        id: "dips",
        muscle_group: "chest",
        name: "Chest Dips",
        description: "Compound movement for the lower chest",
        sets: 3,
        reps: "8-12",
        rest: 90,
        percentage_of_max: 100,
    },
    // Back
    BaseExercise {
        id: "deadlift",
        muscle_group: "back",
        name: "Deadlift",
        description: "King of all exercises",
        sets: 4,
        reps: "5-6",
        rest: 120,
        percentage_of_max: 85,
    },
    BaseExercise {
        id: "lat-pulldown",
        muscle_group: "back",
        name: "Lat Pulldown",
        description: "Builds back width",
        sets: 4,
        reps: "10-12",
        rest: 75,
        percentage_of_max: 70,
    },
    BaseExercise {
        id: "barbell-row",
        muscle_group: "back",
        name: "Barbell Row",
        description: "Back thickness and strength",
        sets: 4,
        reps: "8-10",
        rest: 90,
        percentage_of_max: 75,
    },
    BaseExercise {
        id: "cable-row",
        muscle_group: "back",
        name: "Seated Cable Row",
        description: "Mid-back focus",
        sets: 3,
        reps: "10-12",
        rest: 60,
        percentage_of_max: 65,
    },
    // Shoulders
    BaseExercise {
        id: "ohp",
        muscle_group: "shoulders",
        name: "Overhead Press",
        description: "Compound shoulder strength",
        sets: 4,
        reps: "6-8",
        rest: 90,
        percentage_of_max: 80,
    },
    BaseExercise {
        id: "lateral-raise",
        muscle_group: "shoulders",
        name: "Lateral Raise",
        description: "Side delt isolation",
        sets: 4,
        reps: "12-15",
        rest: 45,
        percentage_of_max: 40,
    },
    BaseExercise {
        id: "face-pull",
        muscle_group: "shoulders",
        name: "Face Pull",
        description: "Rear delts and rotator cuff",
        sets: 3,
        reps: "15-20",
        rest: 45,
        percentage_of_max: 35,
    },
    BaseExercise {
        id: "arnold-press",
        muscle_group: "shoulders",
        name: "Arnold Press",
        description: "Complete shoulder development",
        sets: 3,
        reps: "10-12",
        rest: 75,
        percentage_of_max: 65,
    },
    // Legs
    BaseExercise {
        id: "squat",
        muscle_group: "legs",
        name: "Barbell Squat",
        description: "Fundamental leg exercise",
        sets: 4,
        reps: "6-8",
        rest: 120,
        percentage_of_max: 80,
    },
    BaseExercise {
        id: "leg-press",
        muscle_group: "legs",
        name: "Leg Press",
        description: "Safe quad focus",
        sets: 4,
        reps: "10-12",
        rest: 90,
        percentage_of_max: 80,
    },
    BaseExercise {
        id: "rdl",
        muscle_group: "legs",
        name: "Romanian Deadlift",
        description: "Hamstrings and glutes",
        sets: 3,
        reps: "10-12",
        rest: 90,
        percentage_of_max: 70,
    },
    BaseExercise {
        id: "leg-curl",
        muscle_group: "legs",
        name: "Leg Curl",
        description: "Hamstring isolation",
        sets: 3,
        reps: "12-15",
        rest: 60,
        percentage_of_max: 60,
    },
    // Arms
    BaseExercise {
        id: "barbell-curl",
        muscle_group: "arms",
        name: "Barbell Curl",
        description: "Biceps mass builder",
        sets: 3,
        reps: "10-12",
        rest: 60,
        percentage_of_max: 70,
    },
    BaseExercise {
        id: "tricep-pushdown",
        muscle_group: "arms",
        name: "Tricep Pushdown",
        description: "Triceps isolation",
        sets: 3,
        reps: "12-15",
        rest: 45,
        percentage_of_max: 65,
    },
    BaseExercise {
        id: "hammer-curl",
        muscle_group: "arms",
        name: "Hammer Curl",
        description: "Brachialis and forearms",
        sets: 3,
        reps: "10-12",
        rest: 45,
        percentage_of_max: 65,
    },
    BaseExercise {
        id: "skull-crusher",
        muscle_group: "arms",
        name: "Skull Crusher",
        description: "Triceps stretch and contraction",
        sets: 3,
        reps: "10-12",
        rest: 60,
        percentage_of_max: 60,
    },
    // Core
    BaseExercise {
        id: "cable-crunch",
        muscle_group: "core",
        name: "Cable Crunch",
        description: "Weighted ab work",
        sets: 3,
        reps: "15-20",
        rest: 45,
        percentage_of_max: 50,
    },
    BaseExercise {
        id: "hanging-leg-raise",
        muscle_group: "core",
        name: "Hanging Leg Raise",
        description: "Lower abs",
        sets: 3,
        reps: "12-15",
        rest: 60,
        percentage_of_max: 100,
    },
    BaseExercise {
        id: "plank",
        muscle_group: "core",
        name: "Plank",
        description: "Core stability",
        sets: 3,
        reps: "45-60s",
        rest: 45,
        percentage_of_max: 100,
    },
    BaseExercise {
        id: "russian-twist",
        muscle_group: "core",
        name: "Russian Twist",
        description: "Obliques and rotation",
        sets: 3,
        reps: "20 per side",
        rest: 45,
        percentage_of_max: 40,
    },
];
