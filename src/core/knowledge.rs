// src/core/knowledge.rs

/// Fact lists attached to one knowledge-base topic.
#[derive(Debug, Clone, Copy)]
pub struct TopicFacts {
    pub definitions: &'static [&'static str],
    pub characteristics: &'static [&'static str],
    pub applications: &'static [&'static str],
}

/// Read-only topic table the generator samples from.
///
/// Built once at startup and never mutated afterwards; the builtin table
/// below is the default, but tests construct smaller ones.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    topics: Vec<(&'static str, TopicFacts)>,
}

impl KnowledgeBase {
    pub fn new(topics: Vec<(&'static str, TopicFacts)>) -> Self {
        Self { topics }
    }

    /// The default topic table shipped with the platform.
    pub fn builtin() -> Self {
        Self::new(BUILTIN_TOPICS.to_vec())
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn contains(&self, topic: &str) -> bool {
        self.topics.iter().any(|(name, _)| *name == topic)
    }

    pub fn get(&self, topic: &str) -> Option<&TopicFacts> {
        self.topics
            .iter()
            .find(|(name, _)| *name == topic)
            .map(|(_, facts)| facts)
    }

    pub fn topic_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.topics.iter().map(|(name, _)| *name)
    }

    /// All topics except `topic`, used to build distractor pools.
    pub fn other_topics<'a>(
        &'a self,
        topic: &'a str,
    ) -> impl Iterator<Item = (&'static str, &'a TopicFacts)> + 'a {
        self.topics
            .iter()
            .filter(move |(name, _)| *name != topic)
            .map(|(name, facts)| (*name, facts))
    }
}

/// Question category. Determines which template patterns and which fact
/// list a question draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Definition,
    Function,
    Comparison,
    Application,
    Characteristic,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Definition,
        Category::Function,
        Category::Comparison,
        Category::Application,
        Category::Characteristic,
    ];

    /// Template patterns for this category. Comparison questions reuse the
    /// definition patterns (the comparison branch has always been an alias
    /// for the definition path).
    pub fn templates(self) -> &'static [&'static str] {
        match self {
            Category::Definition | Category::Comparison => DEFINITION_TEMPLATES,
            Category::Function => FUNCTION_TEMPLATES,
            Category::Application => APPLICATION_TEMPLATES,
            Category::Characteristic => CHARACTERISTIC_TEMPLATES,
        }
    }

    /// Which fact list of a topic this category samples answers from.
    /// Function questions describe what a thing is used for, so they share
    /// the applications list; comparison falls back to definitions.
    pub fn fact_pool(self, facts: &TopicFacts) -> &'static [&'static str] {
        match self {
            Category::Definition | Category::Comparison => facts.definitions,
            Category::Characteristic => facts.characteristics,
            Category::Application | Category::Function => facts.applications,
        }
    }
}

const DEFINITION_TEMPLATES: &[&str] = &[
    "What is {keyword}?",
    "Define {keyword}.",
    "Which of the following best describes {keyword}?",
    "{keyword} is defined as:",
];

const FUNCTION_TEMPLATES: &[&str] = &[
    "What is the primary function of {keyword}?",
    "Which function is performed by {keyword}?",
    "The main purpose of {keyword} is to:",
    "What does {keyword} do?",
];

const APPLICATION_TEMPLATES: &[&str] = &[
    "In which scenario would you use {keyword}?",
    "Which application best demonstrates {keyword}?",
    "An example of {keyword} in practice is:",
    "Where is {keyword} commonly applied?",
];

const CHARACTERISTIC_TEMPLATES: &[&str] = &[
    "Which characteristic is true for {keyword}?",
    "What property does {keyword} have?",
    "{keyword} is characterized by:",
    "A key feature of {keyword} is:",
];

const BUILTIN_TOPICS: &[(&str, TopicFacts)] = &[
    (
        "python",
        TopicFacts {
            definitions: &[
                "A high-level programming language",
                "An interpreted language",
                "A general-purpose language",
            ],
            characteristics: &[
                "Dynamic typing",
                "Object-oriented",
                "Easy to learn",
                "Extensive libraries",
            ],
            applications: &[
                "Web development",
                "Data science",
                "Machine learning",
                "Automation",
            ],
        },
    ),
    (
        "database",
        TopicFacts {
            definitions: &[
                "A structured collection of data",
                "An organized data storage system",
                "A data management system",
            ],
            characteristics: &[
                "ACID properties",
                "Data integrity",
                "Concurrent access",
                "Query support",
            ],
            applications: &[
                "Data storage",
                "Transaction processing",
                "Data analysis",
                "Record keeping",
            ],
        },
    ),
    (
        "algorithm",
        TopicFacts {
            definitions: &[
                "A step-by-step procedure",
                "A problem-solving method",
                "A computational process",
            ],
            characteristics: &[
                "Well-defined steps",
                "Finite execution",
                "Input and output",
                "Effectiveness",
            ],
            applications: &[
                "Sorting data",
                "Searching information",
                "Optimization",
                "Problem solving",
            ],
        },
    ),
    (
        "html",
        TopicFacts {
            definitions: &[
                "HyperText Markup Language",
                "A markup language for web pages",
                "Standard web content structure",
            ],
            characteristics: &[
                "Tag-based",
                "Platform independent",
                "Case insensitive",
                "Structured format",
            ],
            applications: &[
                "Creating web pages",
                "Structuring content",
                "Building websites",
                "Web development",
            ],
        },
    ),
    (
        "css",
        TopicFacts {
            definitions: &[
                "Cascading Style Sheets",
                "A stylesheet language",
                "Web design language",
            ],
            characteristics: &[
                "Separation of content and design",
                "Cascading rules",
                "Selector-based",
                "Responsive design",
            ],
            applications: &[
                "Styling web pages",
                "Layout design",
                "Responsive websites",
                "Visual presentation",
            ],
        },
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_has_five_topics() {
        let kb = KnowledgeBase::builtin();
        assert_eq!(kb.topic_names().count(), 5);
        assert!(kb.contains("python"));
        assert!(kb.contains("css"));
        assert!(!kb.contains("rust"));
    }

    #[test]
    fn function_questions_draw_from_applications() {
        let facts = KnowledgeBase::builtin().get("python").copied().unwrap();
        assert_eq!(Category::Function.fact_pool(&facts), facts.applications);
    }

    #[test]
    fn comparison_falls_back_to_definition_path() {
        let facts = KnowledgeBase::builtin().get("database").copied().unwrap();
        assert_eq!(Category::Comparison.fact_pool(&facts), facts.definitions);
        assert_eq!(Category::Comparison.templates(), Category::Definition.templates());
    }
}
