//! The fixed curriculum catalogue and its pure derivations.
//!
//! Eight proficiency groups, numbered 0 through 7. Group 0 holds 20 levels,
//! every other group holds 50. Within a group, every 10th level is a test
//! level. Global level numbers are assigned by walking groups in ascending
//! `group_number` with a running counter starting at 1.

/// One entry of the canonical group catalogue.
#[derive(Debug, Clone, Copy)]
pub struct GroupSpec {
    pub group_number: i32,
    pub name: &'static str,
    pub description: &'static str,
    pub difficulty: i32,
    pub xp_reward: i32,
    pub badge_name: &'static str,
    pub badge_description: &'static str,
}

pub const GROUP_CATALOGUE: [GroupSpec; 8] = [
    GroupSpec {
        group_number: 0,
        name: "Beginner",
        description: "First steps: the alphabet, greetings and everyday words.",
        difficulty: 1,
        xp_reward: 50,
        badge_name: "First Steps",
        badge_description: "Completed the Beginner group.",
    },
    GroupSpec {
        group_number: 1,
        name: "Elementary",
        description: "Simple sentences, common verbs and basic questions.",
        difficulty: 1,
        xp_reward: 100,
        badge_name: "Word Builder",
        badge_description: "Completed the Elementary group.",
    },
    GroupSpec {
        group_number: 2,
        name: "Pre-Intermediate",
        description: "Past and future tenses, descriptions and short stories.",
        difficulty: 2,
        xp_reward: 150,
        badge_name: "Storyteller",
        badge_description: "Completed the Pre-Intermediate group.",
    },
    GroupSpec {
        group_number: 3,
        name: "Intermediate",
        description: "Conversations, opinions and connected speech.",
        difficulty: 2,
        xp_reward: 200,
        badge_name: "Conversationalist",
        badge_description: "Completed the Intermediate group.",
    },
    GroupSpec {
        group_number: 4,
        name: "Upper Intermediate",
        description: "Nuanced grammar, idioms and longer reading passages.",
        difficulty: 3,
        xp_reward: 250,
        badge_name: "Idiom Hunter",
        badge_description: "Completed the Upper Intermediate group.",
    },
    GroupSpec {
        group_number: 5,
        name: "Advanced",
        description: "Complex structures, formal registers and debate.",
        difficulty: 4,
        xp_reward: 300,
        badge_name: "Debater",
        badge_description: "Completed the Advanced group.",
    },
    GroupSpec {
        group_number: 6,
        name: "Expert",
        description: "Near-native fluency: subtle meaning and style.",
        difficulty: 4,
        xp_reward: 350,
        badge_name: "Stylist",
        badge_description: "Completed the Expert group.",
    },
    GroupSpec {
        group_number: 7,
        name: "Master",
        description: "Mastery: literature, wordplay and rhetoric.",
        difficulty: 5,
        xp_reward: 400,
        badge_name: "Grand Master",
        badge_description: "Completed the Master group.",
    },
];

/// Number of levels a group contains: 20 for group 0, 50 for every other group.
pub fn levels_in_group(group_number: i32) -> u32 {
    if group_number == 0 { 20 } else { 50 }
}

/// Whether the 1-based position within a group is a test level.
pub fn is_test_position(position: u32) -> bool {
    position % 10 == 0
}

/// Questions a freshly seeded level receives.
pub fn placeholder_question_count(is_test_level: bool) -> u32 {
    if is_test_level { 10 } else { 6 }
}

/// Total levels across the whole catalogue.
pub fn total_levels() -> u32 {
    GROUP_CATALOGUE
        .iter()
        .map(|g| levels_in_group(g.group_number))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_is_dense_from_zero() {
        for (idx, spec) in GROUP_CATALOGUE.iter().enumerate() {
            assert_eq!(spec.group_number, idx as i32);
        }
    }

    #[test]
    fn catalogue_names() {
        let names: Vec<&str> = GROUP_CATALOGUE.iter().map(|g| g.name).collect();
        assert_eq!(
            names,
            vec![
                "Beginner",
                "Elementary",
                "Pre-Intermediate",
                "Intermediate",
                "Upper Intermediate",
                "Advanced",
                "Expert",
                "Master",
            ]
        );
    }

    #[test]
    fn level_counts() {
        assert_eq!(levels_in_group(0), 20);
        for n in 1..=7 {
            assert_eq!(levels_in_group(n), 50);
        }
        assert_eq!(total_levels(), 370);
    }

    #[test]
    fn test_positions_are_every_tenth() {
        let test_positions: Vec<u32> = (1..=50).filter(|p| is_test_position(*p)).collect();
        assert_eq!(test_positions, vec![10, 20, 30, 40, 50]);
        assert!(!is_test_position(1));
        assert!(!is_test_position(9));
    }

    #[test]
    fn question_totals_match_catalogue() {
        let mut questions = 0;
        for spec in GROUP_CATALOGUE {
            let n = levels_in_group(spec.group_number);
            for position in 1..=n {
                questions += placeholder_question_count(is_test_position(position));
            }
        }
        // 37 test levels at 10 questions, 333 regular levels at 6.
        assert_eq!(questions, 2368);
    }

    #[test]
    fn difficulty_stays_in_band() {
        for spec in GROUP_CATALOGUE {
            assert!((1..=5).contains(&spec.difficulty));
        }
    }
}
