use kalos_domain as domain;

pub fn definition(unique_id: &str, name: &str, category: &str) -> domain::ExerciseDefinition {
    domain::ExerciseDefinition {
        unique_id: domain::UniqueID::new(unique_id).unwrap(),
        name: domain::Name::new(name).unwrap(),
        category: domain::Category::new(category).unwrap(),
        subcategory: String::new(),
        progression_level: domain::ProgressionLevel::FIRST,
        description: String::new(),
        difficulty: domain::Difficulty::Beginner,
        primary_muscle_group: String::new(),
        secondary_muscle_groups: vec![],
        form_cues: vec![],
        xp_value: 10,
        unlock_requirements: String::new(),
    }
}

pub static EXERCISES: std::sync::LazyLock<Vec<domain::Exercise>> =
    std::sync::LazyLock::new(|| vec![EXERCISE.clone(), EXERCISE_2.clone()]);

pub static EXERCISE: std::sync::LazyLock<domain::Exercise> =
    std::sync::LazyLock::new(|| domain::Exercise {
        id: 1.into(),
        definition: domain::ExerciseDefinition {
            unique_id: domain::UniqueID::new("push-wall-push-ups-1").unwrap(),
            name: domain::Name::new("Wall Push-ups").unwrap(),
            category: domain::Category::new("push").unwrap(),
            subcategory: "wall".to_string(),
            progression_level: domain::ProgressionLevel::FIRST,
            description: "Push against a wall".to_string(),
            difficulty: domain::Difficulty::Beginner,
            primary_muscle_group: "chest".to_string(),
            secondary_muscle_groups: vec!["triceps".to_string(), "shoulders".to_string()],
            form_cues: vec!["keep body straight".to_string()],
            xp_value: 10,
            unlock_requirements: String::new(),
        },
    });

pub static EXERCISE_2: std::sync::LazyLock<domain::Exercise> =
    std::sync::LazyLock::new(|| domain::Exercise {
        id: 2.into(),
        definition: domain::ExerciseDefinition {
            unique_id: domain::UniqueID::new("core-l-sit-5").unwrap(),
            name: domain::Name::new("L-Sit").unwrap(),
            category: domain::Category::new("core").unwrap(),
            subcategory: "compression".to_string(),
            progression_level: domain::ProgressionLevel::new(5).unwrap(),
            description: String::new(),
            difficulty: domain::Difficulty::Other("elite".to_string()),
            primary_muscle_group: "abs".to_string(),
            secondary_muscle_groups: vec!["hip flexors".to_string()],
            form_cues: vec!["depress shoulders".to_string(), "lock knees".to_string()],
            xp_value: 75,
            unlock_requirements: "Tuck L-Sit for 30 seconds".to_string(),
        },
    });

pub const EXERCISE_FILE: &str = "\
name;category;subcategory;progressionLevel;difficulty;primaryMuscleGroup;secondaryMuscleGroups;formCues;uniqueId;xpValue
Wall Push-ups;push;wall;1;beginner;chest;triceps, shoulders;keep body straight;;
Incline Push-ups;push;incline;2;beginner;chest;triceps;;;
Push-ups;push;;3;intermediate;chest;\"triceps; shoulders\";\"lock out; brace\";;35
;push;;4;;;;;;
Plank;core;;abc;;abs;;;core-plank;
";
