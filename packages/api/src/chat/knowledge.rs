//! # Keyword-matched answers for the chat widget
//!
//! The widget answers without any network call: the input is lowercased and
//! scanned against [`KNOWLEDGE`] in order, and the first entry with any keyword
//! contained in the input wins. Order matters, so specific genes come before
//! the generic topics that would otherwise shadow them.

use serde::{Deserialize, Serialize};

/// One canned answer and the keywords that trigger it.
pub struct Entry {
    pub keywords: &'static [&'static str],
    pub answer: &'static str,
}

pub const FALLBACK: &str = "I'm not sure about that specific question. I can help with topics like **CYP genes** (CYP2C19, CYP2C9, CYP2D6), **drug interactions** (warfarin, clopidogrel, simvastatin), **metabolizer types**, **CPIC guidelines**, or **how to use PharmaGuard**. Try asking one of those!";

pub const WELCOME: &str = "Hi! I'm **PharmaGuard AI**.\n\nI can help you understand pharmacogenomics, drug-gene interactions, CPIC guidelines, and how to use this platform.\n\nWhat would you like to know?";

pub const SUGGESTIONS: [&str; 4] = [
    "What is CYP2C19?",
    "What does Poor Metabolizer mean?",
    "How does warfarin work with genes?",
    "What is PharmaGuard?",
];

pub static KNOWLEDGE: &[Entry] = &[
    Entry {
        keywords: &["cyp2c19", "cyp 2c19"],
        answer: "**CYP2C19** is a liver enzyme that metabolizes clopidogrel (Plavix), several SSRIs and proton pump inhibitors.\n\nYour variant decides whether you are a *Poor Metabolizer* (the drug lingers, higher risk), a *Normal Metabolizer*, or an *Ultrarapid Metabolizer* (the drug clears too fast, weaker effect).\n\n> Discuss your results with your doctor before changing any medication.",
    },
    Entry {
        keywords: &["cyp2c9", "cyp 2c9"],
        answer: "**CYP2C9** metabolizes warfarin, NSAIDs such as ibuprofen, and several diabetes medications.\n\nVariants like *1/*3 (Intermediate Metabolizer) cut enzyme activity sharply, so the drug accumulates. CPIC recommends lower warfarin doses for CYP2C9 poor metabolizers.\n\n> Clinical decisions should always be made with your healthcare provider.",
    },
    Entry {
        keywords: &["cyp2d6", "cyp 2d6"],
        answer: "**CYP2D6** handles about a quarter of all medications, including codeine, tamoxifen, many antidepressants and antipsychotics.\n\nPoor Metabolizers cannot turn codeine into morphine (little pain relief), while Ultrarapid Metabolizers convert it dangerously fast. CPIC advises avoiding codeine at both extremes.",
    },
    Entry {
        keywords: &["warfarin", "blood thinner", "anticoagulant"],
        answer: "**Warfarin** dosing depends on two genes:\n- **CYP2C9** controls how fast warfarin is cleared\n- **VKORC1** controls how sensitive you are to it\n\nPharmaGuard looks at both to suggest a starting dose. Too much warfarin causes bleeding, too little allows clots. CPIC Level A evidence supports gene-guided dosing.",
    },
    Entry {
        keywords: &["clopidogrel", "plavix"],
        answer: "**Clopidogrel (Plavix)** is a prodrug that **CYP2C19** must activate. Poor Metabolizers (*2/*2) make little active metabolite, so platelets stay active and cardiovascular risk rises.\n\nCPIC recommends prasugrel or ticagrelor instead for poor metabolizers.",
    },
    Entry {
        keywords: &["simvastatin", "statin", "slco1b1"],
        answer: "**Simvastatin** and other statins reach liver cells through the **SLCO1B1** transporter. The 521C variant weakens it, raising statin blood levels and the risk of myopathy.\n\nPharmaGuard reports SLCO1B1 521TT (normal function) as 'Safe' for standard statin doses.",
    },
    Entry {
        keywords: &["poor metabolizer", "poor metab"],
        answer: "A **Poor Metabolizer** has little or no enzyme activity because of genetic variants:\n- drugs cleared by the enzyme build up, raising **toxicity risk**\n- prodrugs activated by the enzyme may not work, lowering **efficacy**\n\nExample: a CYP2C19 Poor Metabolizer taking clopidogrel gets inadequate antiplatelet effect.",
    },
    Entry {
        keywords: &["ultrarapid", "ultra rapid", "rapid metabolizer"],
        answer: "An **Ultrarapid Metabolizer** carries extra enzyme copies and breaks drugs down much faster than normal. That can:\n- make a drug ineffective because it clears before it works\n- make prodrugs dangerous, e.g. codeine becomes morphine too quickly\n\nCPIC flags ultrarapid metabolizers for dose changes or a different drug.",
    },
    Entry {
        keywords: &["cpic", "guideline", "guidelines"],
        answer: "**CPIC (Clinical Pharmacogenomics Implementation Consortium)** publishes evidence-based guidelines for turning genetic test results into prescribing decisions.\n\nCPIC levels:\n- **Level A**: strong evidence, change prescribing\n- **Level B**: moderate evidence\n- **Level C/D**: limited evidence\n\nPharmaGuard uses Level A and B guidelines for its risk assessments.",
    },
    Entry {
        keywords: &["vcf", "vcf file", "genomic", "genome", "dna", "genetic test"],
        answer: "**VCF (Variant Call Format)** files hold the genetic variants found by sequencing or genotyping.\n\nUpload yours on the **Patient Analysis** dashboard. PharmaGuard picks out pharmacogene variants (CYP2C9, CYP2C19, SLCO1B1 and others) and checks them against CPIC guidelines to build a drug risk report.",
    },
    Entry {
        keywords: &["risk", "risk level", "safe", "toxic", "adjust", "avoid"],
        answer: "PharmaGuard reports these **risk levels**:\n- **Safe**: standard dosing is appropriate\n- **Adjust**: a dose change is recommended\n- **Avoid**: an alternative drug is strongly recommended\n- **Toxic**: serious adverse reaction risk, do not use\n\nThey follow CPIC evidence-based guidelines.",
    },
    Entry {
        keywords: &["patient", "patient dashboard", "patient analysis"],
        answer: "The **Patient Analysis Dashboard** lets you:\n1. Upload your VCF file\n2. Pick the drugs you take or were prescribed\n3. Enter basic patient information\n4. Press **Run Analysis** for drug-gene risk predictions\n\nEach result shows the risk level, the gene involved, your phenotype and a clinical recommendation.",
    },
    Entry {
        keywords: &["doctor", "doctor dashboard", "physician"],
        answer: "The **Doctor Dashboard** gives clinicians an overview of patient analyses, risk alerts and cohort analytics.\n\nDoctors can review flagged high-risk cases and send alerts straight from the patient table.",
    },
    Entry {
        keywords: &["admin", "administrator", "admin dashboard"],
        answer: "The **Admin Dashboard** covers platform-wide oversight:\n- active clinician count\n- security event monitoring\n- total analyses performed\n- role-based access control",
    },
    Entry {
        keywords: &["pharmaguard", "what is pharmaguard", "about"],
        answer: "**PharmaGuard** is a pharmacogenomic risk prediction platform for precision medicine.\n\nIt combines your genomic data (VCF files) with CPIC guidelines to predict how your genes affect your response to medications, helping clinicians prescribe safely.",
    },
    Entry {
        keywords: &["hello", "hi", "hey", "greet"],
        answer: "Hi there! I'm **PharmaGuard AI**, your pharmacogenomics assistant.\n\nI can explain drug-gene interactions, walk you through your risk results, or show you around the platform. What would you like to know?",
    },
    Entry {
        keywords: &["thank", "thanks", "thank you"],
        answer: "You're welcome! Ask anything else about pharmacogenomics, your results, or using PharmaGuard.",
    },
    Entry {
        keywords: &["forgot password", "reset password", "password"],
        answer: "To reset your password:\n1. Open the **Login** page\n2. Click **\"Forgot password?\"**\n3. Enter your email address\n4. Open the reset link from your inbox\n5. Choose a new password",
    },
    Entry {
        keywords: &["register", "sign up", "create account"],
        answer: "To create an account:\n1. Go to **[/register](/register)**\n2. Enter your email and password and pick a role (Patient, Doctor or Admin)\n3. Click **Create Account**\n4. Sign in right away, no email confirmation needed",
    },
];

/// Answer for a user message, or [`FALLBACK`] when nothing matches.
pub fn find_answer(input: &str) -> &'static str {
    let lower = input.trim().to_lowercase();
    KNOWLEDGE
        .iter()
        .find(|entry| entry.keywords.iter().any(|kw| lower.contains(kw)))
        .map(|entry| entry.answer)
        .unwrap_or(FALLBACK)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: usize,
    pub role: Speaker,
    pub content: String,
}

/// Conversation shown by the widget. Lives only as long as the page.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
}

impl Default for ChatLog {
    fn default() -> Self {
        Self {
            messages: vec![ChatMessage {
                id: 0,
                role: Speaker::Assistant,
                content: WELCOME.to_string(),
            }],
        }
    }
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn push(&mut self, role: Speaker, content: impl Into<String>) {
        let id = self.messages.len();
        self.messages.push(ChatMessage {
            id,
            role,
            content: content.into(),
        });
    }

    /// Record a user message and return it trimmed. Blank input is ignored.
    pub fn submit(&mut self, input: &str) -> Option<String> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        self.push(Speaker::User, input);
        Some(input.to_string())
    }

    /// Record the matched answer to `question`.
    pub fn reply(&mut self, question: &str) -> &'static str {
        let answer = find_answer(question);
        self.push(Speaker::Assistant, answer);
        answer
    }

    /// Only the welcome message so far.
    pub fn is_fresh(&self) -> bool {
        self.messages.len() == 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer_containing(keyword: &str) -> &'static str {
        KNOWLEDGE
            .iter()
            .find(|e| e.keywords.contains(&keyword))
            .map(|e| e.answer)
            .unwrap()
    }

    #[test]
    fn test_fallback_when_nothing_matches() {
        assert_eq!(find_answer("what's the weather tomorrow?"), FALLBACK);
        assert_eq!(find_answer(""), FALLBACK);
    }

    #[test]
    fn test_case_insensitive_match() {
        assert_eq!(find_answer("Tell me about CYP2C19"), answer_containing("cyp2c19"));
        assert_eq!(find_answer("  WARFARIN dosing "), answer_containing("warfarin"));
    }

    #[test]
    fn test_first_entry_wins() {
        // Mentions both a gene and a drug; the gene entry comes first.
        assert_eq!(
            find_answer("does cyp2c9 affect warfarin?"),
            answer_containing("cyp2c9")
        );
    }

    #[test]
    fn test_suggestions_have_answers() {
        for suggestion in SUGGESTIONS {
            assert_ne!(find_answer(suggestion), FALLBACK, "{suggestion}");
        }
        assert_eq!(
            find_answer("What does Poor Metabolizer mean?"),
            answer_containing("poor metabolizer")
        );
        assert_eq!(find_answer("What is PharmaGuard?"), answer_containing("pharmaguard"));
    }

    #[test]
    fn test_chat_log() {
        let mut log = ChatLog::new();
        assert!(log.is_fresh());
        assert_eq!(log.messages()[0].content, WELCOME);

        assert!(log.submit("   ").is_none());
        assert!(log.is_fresh());

        let question = log.submit("  thanks! ").unwrap();
        assert_eq!(question, "thanks!");
        assert_eq!(log.messages().len(), 2);
        assert!(!log.is_fresh());

        let answer = log.reply(&question);
        assert_eq!(answer, answer_containing("thanks"));
        let messages = log.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].role, Speaker::User);
        assert_eq!(messages[1].content, "thanks!");
        assert_eq!(messages[2].role, Speaker::Assistant);
        assert_eq!(messages[2].id, 2);
        assert_eq!(messages[2].content, answer);
    }

    #[test]
    fn test_reply_without_match() {
        let mut log = ChatLog::new();
        let question = log.submit("zzzz").unwrap();
        assert_eq!(log.reply(&question), FALLBACK);
        assert_eq!(log.messages().len(), 3);
    }
}
