//! Built-in keyword taxonomy
//!
//! Four closed vocabularies of job-market terms. Category lookup checks the
//! sets in a fixed order (hard skill wins over soft skill wins over tool wins
//! over technology) so a term listed twice always reports the same category.

use crate::processing::document::KeywordCategory;
use std::collections::HashSet;

const HARD_SKILLS: &[&str] = &[
    "javascript", "typescript", "python", "java", "c++", "c#", "ruby", "go", "golang",
    "rust", "swift", "kotlin", "php", "scala", "r", "matlab", "perl", "sql", "nosql",
    "html", "css", "sass", "less", "react", "reactjs", "react.js", "angular", "angularjs",
    "vue", "vuejs", "vue.js", "svelte", "nextjs", "next.js", "nuxt", "gatsby",
    "node", "nodejs", "node.js", "express", "expressjs", "fastify", "nest", "nestjs",
    "django", "flask", "fastapi", "spring", "springboot", "rails", "laravel",
    "asp.net", ".net", "dotnet", "entity framework",
    "aws", "azure", "gcp", "google cloud", "amazon web services", "cloud computing",
    "docker", "kubernetes", "k8s", "terraform", "ansible", "jenkins", "circleci",
    "github actions", "gitlab ci", "ci/cd", "devops", "sre",
    "mongodb", "postgresql", "postgres", "mysql", "redis", "elasticsearch", "cassandra",
    "dynamodb", "firebase", "supabase", "prisma", "sequelize", "typeorm",
    "graphql", "rest", "restful", "api", "microservices", "serverless",
    "machine learning", "ml", "deep learning", "dl", "artificial intelligence", "ai",
    "neural networks", "tensorflow", "pytorch", "keras", "scikit-learn", "pandas", "numpy",
    "data science", "data analysis", "data engineering", "etl", "data pipeline",
    "tableau", "power bi", "looker", "metabase",
    "git", "github", "gitlab", "bitbucket", "svn",
    "linux", "unix", "bash", "shell", "powershell",
    "agile", "scrum", "kanban", "jira", "confluence", "trello",
    "figma", "sketch", "adobe xd", "photoshop", "illustrator",
    "seo", "sem", "google analytics", "marketing automation",
    "salesforce", "hubspot", "zendesk", "intercom",
    "blockchain", "web3", "solidity", "smart contracts",
    "unity", "unreal engine", "game development",
    "ios", "android", "react native", "flutter", "xamarin",
    "testing", "unit testing", "integration testing", "e2e", "jest", "mocha", "cypress",
    "selenium", "puppeteer", "playwright",
    "webpack", "vite", "rollup", "parcel", "babel", "esbuild",
    "oauth", "jwt", "authentication", "authorization", "security",
    "networking", "tcp/ip", "http", "https", "ssl", "tls",
    "load balancing", "nginx", "apache", "cdn",
];

const SOFT_SKILLS: &[&str] = &[
    "communication", "leadership", "teamwork", "collaboration", "problem solving",
    "problem-solving", "critical thinking", "analytical", "creativity", "creative",
    "adaptability", "flexibility", "time management", "organization", "organized",
    "attention to detail", "detail oriented", "detail-oriented", "self motivated",
    "self-motivated", "initiative", "proactive", "work ethic", "reliability",
    "dependability", "interpersonal", "presentation", "public speaking",
    "written communication", "verbal communication", "negotiation", "persuasion",
    "conflict resolution", "decision making", "decision-making", "strategic thinking",
    "mentoring", "coaching", "empathy", "emotional intelligence", "patience",
    "stress management", "resilience", "positive attitude", "enthusiasm",
    "customer service", "client relations", "stakeholder management",
    "cross-functional", "multitasking", "prioritization", "deadline driven",
    "results oriented", "results-oriented", "goal oriented", "goal-oriented",
    "innovative", "resourceful", "independent", "autonomous",
];

const TOOLS: &[&str] = &[
    "jira", "confluence", "trello", "asana", "monday", "notion", "slack", "teams",
    "microsoft teams", "zoom", "google meet", "skype",
    "excel", "word", "powerpoint", "google sheets", "google docs", "google slides",
    "outlook", "gmail", "calendar",
    "vs code", "visual studio", "intellij", "pycharm", "webstorm", "eclipse", "xcode",
    "android studio", "sublime", "atom", "vim", "emacs",
    "postman", "insomnia", "swagger", "charles", "fiddler",
    "datadog", "new relic", "splunk", "grafana", "prometheus", "sentry",
    "aws console", "azure portal", "gcp console",
    "s3", "ec2", "lambda", "cloudfront", "route53", "rds", "ecs", "eks",
    "heroku", "vercel", "netlify", "digitalocean", "linode",
    "npm", "yarn", "pnpm", "pip", "conda", "maven", "gradle", "cargo",
    "homebrew", "apt", "yum", "docker compose", "docker hub",
];

const TECHNOLOGIES: &[&str] = &[
    "html5", "css3", "es6", "ecmascript", "json", "xml", "yaml", "markdown",
    "websocket", "webrtc", "pwa", "spa", "ssr", "ssg", "jamstack",
    "responsive design", "mobile first", "accessibility", "a11y", "wcag",
    "seo optimization", "performance optimization", "caching", "memoization",
    "state management", "redux", "mobx", "zustand", "recoil", "context api",
    "hooks", "hoc", "render props", "composition",
    "orm", "query optimization", "indexing", "sharding", "replication",
    "event driven", "message queue", "rabbitmq", "kafka", "sqs", "sns",
    "pub/sub", "webhooks", "polling", "long polling", "server sent events", "sse",
    "oauth2", "openid", "saml", "sso", "mfa", "2fa", "encryption",
    "https", "cors", "csrf", "xss prevention", "sql injection prevention",
    "containerization", "orchestration", "infrastructure as code", "iac",
    "monitoring", "logging", "alerting", "observability", "tracing",
    "a/b testing", "feature flags", "canary deployment", "blue-green deployment",
    "continuous integration", "continuous deployment", "continuous delivery",
    "version control", "branching strategy", "gitflow", "trunk based development",
];

pub struct KeywordTaxonomy {
    hard_skills: HashSet<&'static str>,
    soft_skills: HashSet<&'static str>,
    tools: HashSet<&'static str>,
    technologies: HashSet<&'static str>,
}

impl Default for KeywordTaxonomy {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordTaxonomy {
    pub fn new() -> Self {
        Self {
            hard_skills: HARD_SKILLS.iter().copied().collect(),
            soft_skills: SOFT_SKILLS.iter().copied().collect(),
            tools: TOOLS.iter().copied().collect(),
            technologies: TECHNOLOGIES.iter().copied().collect(),
        }
    }

    pub fn hard_skills(&self) -> &HashSet<&'static str> {
        &self.hard_skills
    }

    pub fn soft_skills(&self) -> &HashSet<&'static str> {
        &self.soft_skills
    }

    pub fn tools(&self) -> &HashSet<&'static str> {
        &self.tools
    }

    pub fn technologies(&self) -> &HashSet<&'static str> {
        &self.technologies
    }

    /// Category of a term per the priority order documented above. Unlisted
    /// terms are `Other`.
    pub fn category_of(&self, keyword: &str) -> KeywordCategory {
        let lower = keyword.to_lowercase();
        if self.hard_skills.contains(lower.as_str()) {
            KeywordCategory::HardSkill
        } else if self.soft_skills.contains(lower.as_str()) {
            KeywordCategory::SoftSkill
        } else if self.tools.contains(lower.as_str()) {
            KeywordCategory::Tool
        } else if self.technologies.contains(lower.as_str()) {
            KeywordCategory::Technology
        } else {
            KeywordCategory::Other
        }
    }

    /// Every term across all four sets, for matcher construction.
    pub fn all_terms(&self) -> Vec<&'static str> {
        self.hard_skills
            .iter()
            .chain(self.soft_skills.iter())
            .chain(self.tools.iter())
            .chain(self.technologies.iter())
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_priority_for_shared_terms() {
        let taxonomy = KeywordTaxonomy::new();
        // jira appears in both hard skills and tools; hard skill wins
        assert_eq!(taxonomy.category_of("jira"), KeywordCategory::HardSkill);
        assert_eq!(taxonomy.category_of("JIRA"), KeywordCategory::HardSkill);
    }

    #[test]
    fn test_category_lookup() {
        let taxonomy = KeywordTaxonomy::new();
        assert_eq!(taxonomy.category_of("rust"), KeywordCategory::HardSkill);
        assert_eq!(taxonomy.category_of("leadership"), KeywordCategory::SoftSkill);
        assert_eq!(taxonomy.category_of("postman"), KeywordCategory::Tool);
        assert_eq!(taxonomy.category_of("kafka"), KeywordCategory::Technology);
        assert_eq!(taxonomy.category_of("underwater basket weaving"), KeywordCategory::Other);
    }

    #[test]
    fn test_multi_word_terms_present() {
        let taxonomy = KeywordTaxonomy::new();
        assert!(taxonomy.hard_skills().contains("machine learning"));
        assert!(taxonomy.soft_skills().contains("attention to detail"));
        assert!(taxonomy.technologies().contains("infrastructure as code"));
    }
}
