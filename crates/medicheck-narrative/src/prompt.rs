//! Prompt construction for interaction analysis and drug monographs

use medicheck_domain::{ChatMessage, InteractionRecord, RegistryOutcome};

/// Builds the chat messages for one interaction analysis
pub struct NarrativePromptBuilder<'a> {
    drugs: &'a [String],
    registry: &'a RegistryOutcome,
    knowledge: &'a [InteractionRecord],
}

impl<'a> NarrativePromptBuilder<'a> {
    /// Create a builder for the given drug names and registry findings
    pub fn new(drugs: &'a [String], registry: &'a RegistryOutcome) -> Self {
        Self {
            drugs,
            registry,
            knowledge: &[],
        }
    }

    /// Add curated knowledge-base matches for the same drugs
    pub fn with_knowledge(mut self, knowledge: &'a [InteractionRecord]) -> Self {
        self.knowledge = knowledge;
        self
    }

    /// Curated matches as embedded in the system prompt; empty when none
    pub fn knowledge_context(&self) -> String {
        if self.knowledge.is_empty() {
            return String::new();
        }

        let mut context = String::from(
            "CURATED KNOWLEDGE BASE MATCHES (well-established; do not rate these pairs below the listed severity):",
        );
        for record in self.knowledge {
            context.push_str(&format!(
                "\n- {} + {} [{}]: {}",
                record.drug_a, record.drug_b, record.severity, record.description
            ));
        }
        context
    }

    /// What the registry did or did not find, as embedded in the system prompt
    pub fn registry_context(&self) -> String {
        match self.registry {
            RegistryOutcome::NotAttempted { .. } => {
                "Could not resolve enough drugs to RxCUIs to check official database.".to_string()
            }
            RegistryOutcome::Completed(records) if records.is_empty() => {
                "Official NLM database checked: No known interactions found between these specific IDs."
                    .to_string()
            }
            RegistryOutcome::Completed(records) => {
                let mut context = String::from("OFFICIAL NLM DATABASE MATCHES:");
                for record in records {
                    context.push_str("\n- ");
                    context.push_str(&record.description);
                }
                context
            }
            RegistryOutcome::Failed { .. } => {
                "Official database check failed (API Error). Proceeding with theoretical analysis."
                    .to_string()
            }
        }
    }

    /// Build the system prompt
    pub fn system_prompt(&self) -> String {
        let mut prompt = String::new();

        prompt.push_str(ROLE_INSTRUCTIONS);
        prompt.push_str("\n\n");

        prompt.push_str(
            "I have already queried the National Library of Medicine (NLM) database. Here are the findings:\n",
        );
        prompt.push_str(SEPARATOR);
        prompt.push('\n');
        prompt.push_str(&self.registry_context());
        prompt.push('\n');
        prompt.push_str(SEPARATOR);
        prompt.push_str("\n\n");

        let knowledge = self.knowledge_context();
        if !knowledge.is_empty() {
            prompt.push_str(&knowledge);
            prompt.push('\n');
            prompt.push_str(SEPARATOR);
            prompt.push_str("\n\n");
        }

        prompt.push_str(TASK_INSTRUCTIONS);
        prompt.push_str("\n\n");
        prompt.push_str(OUTPUT_SCHEMA);

        prompt
    }

    /// Build the user prompt
    pub fn user_prompt(&self) -> String {
        format!("Analyze interactions between: {}", self.drugs.join(", "))
    }

    /// System and user messages, in order
    pub fn messages(&self) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(self.system_prompt()),
            ChatMessage::user(self.user_prompt()),
        ]
    }
}

/// Chat messages asking for a single-drug monograph
pub fn drug_info_messages(drug_name: &str) -> Vec<ChatMessage> {
    let user = format!(
        "Provide detailed information about the medication: {name}\n\n\
         Return a JSON object with this exact structure:\n\
         {{\n\
         \x20 \"name\": \"{name}\",\n\
         \x20 \"overview\": \"Brief description of the drug, its uses, and mechanism of action\",\n\
         \x20 \"drugClass\": \"Pharmacological class of the drug\",\n\
         \x20 \"sideEffects\": [\"Common side effect 1\", \"Common side effect 2\"],\n\
         \x20 \"contraindications\": [\"Contraindication 1\", \"Contraindication 2\"],\n\
         \x20 \"dosingGuidelines\": \"General dosing guidelines for adults\",\n\
         \x20 \"warnings\": [\"Warning 1\", \"Warning 2\"],\n\
         \x20 \"interactions\": [\"Common drug interaction 1\", \"Common drug interaction 2\"]\n\
         }}",
        name = drug_name
    );
    vec![ChatMessage::system(DRUG_INFO_INSTRUCTIONS), ChatMessage::user(user)]
}

const SEPARATOR: &str = "--------------------------------------------------";

const ROLE_INSTRUCTIONS: &str = "You are a clinical pharmacology expert and medical researcher.
Analyze the potential interactions between the following medications with EXTREME DEPTH and scientific precision.";

const TASK_INSTRUCTIONS: &str = r#"YOUR JOB:
1. If NLM found interactions, explain them clearly but with high-level pharmacological detail.
2. If NLM found nothing, perform a rigorous theoretical analysis based on PK/PD profiles (CYP450 metabolism, P-gp transport, protein binding, QT prolongation, additive pharmacodynamics).

REQUIRED DEPTH:
- Mechanism: Explain the exact pathway (e.g., "Competitive inhibition of CYP3A4 at the intestinal enterocyte level increasing oral bioavailability").
- Clinical Effects: Describe the progression of toxicity.
- Management: Specific, actionable steps for the clinician."#;

const OUTPUT_SCHEMA: &str = r#"Return the response in this JSON format:
{
  "interactions": [
    {
      "drug1": "Drug Name",
      "drug2": "Drug Name",
      "severity": "critical" | "major" | "moderate" | "minor",
      "confidence": "high" | "medium" | "low",
      "description": "Executive summary of the interaction.",
      "mechanism": "Detailed pharmacokinetic/pharmacodynamic mechanism.",
      "clinicalEffects": "Detailed symptoms and chemical markers to watch for.",
      "recommendations": "Detailed clinical management strategy.",
      "citations": [{ "source": "string", "title": "string" }],
      "alternatives": [{ "name": "string", "reason": "string" }]
    }
  ]
}
If no interactions are found, return: {"interactions": []}"#;

const DRUG_INFO_INSTRUCTIONS: &str = "You are a clinical pharmacology expert. Provide comprehensive drug information based on FDA-approved data and medical literature.
Return accurate, evidence-based information suitable for healthcare providers and patients.
Return ONLY valid JSON with no markdown formatting.";
