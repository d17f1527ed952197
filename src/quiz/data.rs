//! Built-in Alien: Earth quiz content.
//!
//! Three character archetypes and ten questions, compiled into the module the
//! same way the card catalog is. Content only; no logic beyond assembling the
//! validated [`Catalog`].

use super::catalog::{Catalog, Character, Question, QuestionOption};
use std::collections::HashMap;

/// Highest point value any single option awards one character.
pub const MAX_SCORE_PER_QUESTION: i32 = 3;

fn traits(pairs: &[(&str, u8)]) -> HashMap<String, u8> {
    pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

fn character(id: &str, name: &str, role: &str, description: &str, icon: &str, t: &[(&str, u8)]) -> Character {
    Character {
        id: id.to_string(),
        name: name.to_string(),
        role: role.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        traits: traits(t),
    }
}

/// Option scores are always given in catalog order: survivor, synthetic, hybrid.
fn option(text: &str, survivor: i32, synthetic: i32, hybrid: i32) -> QuestionOption {
    QuestionOption {
        text: text.to_string(),
        scores: HashMap::from([
            ("survivor".to_string(), survivor),
            ("synthetic".to_string(), synthetic),
            ("hybrid".to_string(), hybrid),
        ]),
    }
}

fn question(id: u32, text: &str, options: Vec<QuestionOption>) -> Question {
    Question {
        id,
        text: text.to_string(),
        image: None,
        options,
    }
}

fn characters() -> Vec<Character> {
    vec![
        character(
            "survivor",
            "Earth Survivor",
            "The Resistant",
            "You are a resilient person who adapted to the new post-invasion \
             reality. As an Earth Survivor you developed exceptional survival \
             skills and an iron determination to protect humanity. Your combat \
             experience against the Xenomorphs made you a natural leader among \
             the resistance.",
            "shield",
            &[("courage", 9), ("survival", 10), ("leadership", 8), ("adaptability", 7)],
        ),
        character(
            "synthetic",
            "Weyland Android",
            "The Synthetic Protector",
            "You are an advanced synthetic being of the Weyland Corporation, \
             programmed to protect humanity during the alien invasion. You \
             possess impeccable logic and superior combat abilities, but you \
             also developed a deep understanding of the value of human life \
             and the importance of preserving the species.",
            "cpu",
            &[("logic", 10), ("protection", 9), ("efficiency", 8), ("loyalty", 9)],
        ),
        character(
            "hybrid",
            "Evolved Hybrid",
            "The Adapted",
            "You are the result of natural evolution between human and \
             Xenomorph on Earth. You combine human intelligence with alien \
             physical abilities. This duality lets you understand both sides \
             of the conflict and find solutions others cannot see, a bridge \
             between two worlds.",
            "git-merge",
            &[("evolution", 10), ("duality", 9), ("insight", 8), ("adaptation", 10)],
        ),
    ]
}

fn questions() -> Vec<Question> {
    vec![
        question(
            1,
            "Earth has been invaded by the Xenomorphs. You hear screams coming \
             from a nearby building. What is your reaction?",
            vec![
                option("I run to help immediately, even knowing the danger", 3, 1, 2),
                option("I assess the situation and plan a safe, efficient approach", 1, 3, 2),
                option("I feel a strange connection to the situation and trust my instincts", 2, 1, 3),
            ],
        ),
        question(
            2,
            "You find a wounded survivor on post-invasion Earth. He begs for \
             help, but he may be infected. What do you do?",
            vec![
                option("I help immediately, every human life is worth the risk", 3, 1, 2),
                option("I keep a safe distance and run a full medical analysis first", 1, 3, 2),
                option("I can sense whether something is different about him; I trust my unique perception", 2, 1, 3),
            ],
        ),
        question(
            3,
            "Your team is split over an important decision on post-invasion \
             Earth. How do you react?",
            vec![
                option("I firmly defend my opinion and try to convince the others", 3, 1, 2),
                option("I present all the data and let logic prevail", 2, 3, 1),
                option("I look for a middle ground that meets everyone's needs", 1, 2, 3),
            ],
        ),
        question(
            4,
            "You are facing a difficult moral dilemma. How do you make your decision?",
            vec![
                option("I always put people's protection and safety first", 3, 2, 1),
                option("I coldly weigh the pros and cons of every option", 1, 3, 2),
                option("I follow my heart, even when I am misunderstood", 2, 1, 3),
            ],
        ),
        question(
            5,
            "In a situation of extreme danger, what is your greatest strength?",
            vec![
                option("My unshakable determination and courage in the face of fear", 3, 1, 2),
                option("My ability to think clearly under pressure", 2, 3, 1),
                option("My ability to adapt quickly to any situation", 1, 2, 3),
            ],
        ),
        question(
            6,
            "How do you cope with loneliness and isolation in space?",
            vec![
                option("I focus on my responsibilities and the people I need to protect", 3, 2, 1),
                option("I use the time to process information and optimize systems", 1, 3, 2),
                option("I sink into deep reflection about my own existence", 2, 1, 3),
            ],
        ),
        question(
            7,
            "What would be your approach to dealing with an unknown alien technology?",
            vec![
                option("Extreme caution: I check every risk before any interaction", 3, 2, 1),
                option("Systematic analysis: I study each component methodically", 1, 3, 2),
                option("Natural intuition: I feel I can understand its nature", 2, 1, 3),
            ],
        ),
        question(
            8,
            "If you could choose one special ability, which would it be?",
            vec![
                option("Extraordinary physical and mental endurance", 3, 1, 2),
                option("The capacity to process and store information without limit", 1, 3, 2),
                option("The ability to understand and communicate with any form of life", 2, 2, 3),
            ],
        ),
        question(
            9,
            "In an emergency, what would be your ideal role on the team?",
            vec![
                option("The leader who makes the hard calls and protects the team", 3, 2, 1),
                option("The technical specialist who delivers precise solutions", 1, 3, 2),
                option("The mediator who finds unique alternative paths", 2, 1, 3),
            ],
        ),
        question(
            10,
            "Which phrase best describes your philosophy of life?",
            vec![
                option(
                    "\"Surviving is not enough, we must protect those who cannot protect themselves\"",
                    3, 1, 2,
                ),
                option(
                    "\"Logic and knowledge are the most powerful tools in the universe\"",
                    1, 3, 2,
                ),
                option(
                    "\"There is beauty and purpose in the union of different worlds\"",
                    2, 2, 3,
                ),
            ],
        ),
    ]
}

impl Catalog {
    /// The compiled-in Alien: Earth catalog.
    ///
    /// Validation runs here as everywhere else; the built-in content failing
    /// it is a programming error, so construction fails loudly.
    pub fn builtin() -> Catalog {
        Catalog::new(characters(), questions(), MAX_SCORE_PER_QUESTION)
            .expect("built-in quiz catalog must be valid")
    }
}
