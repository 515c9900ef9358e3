//! The curated interaction table

use crate::template::InteractionTemplate;
use medicheck_domain::Severity::{Major, Moderate};
use medicheck_domain::Severity;

type Entry = (&'static str, &'static str, InteractionTemplate);

fn entry(
    a: &'static str,
    b: &'static str,
    severity: Severity,
    text: [&str; 4],
) -> Entry {
    let [description, mechanism, clinical_effects, recommendations] = text;
    (
        a,
        b,
        InteractionTemplate::curated(severity, description, mechanism, clinical_effects, recommendations),
    )
}

const NSAID_ACE: [&str; 4] = [
    "NSAIDs may diminish the antihypertensive effect of ACE inhibitors.",
    "Inhibition of renal prostaglandins.",
    "Potential increase in blood pressure; risk of renal impairment.",
    "Monitor blood pressure and kidney function.",
];

const NSAID_ANTICOAGULANT: [&str; 4] = [
    "Increases risk of bleeding.",
    "Antiplatelet effect additive to anticoagulant effect.",
    "Risk of serious GI bleeding or hemorrhage.",
    "Avoid concurrent use unless strictly monitored.",
];

pub(crate) fn entries() -> Vec<Entry> {
    vec![
        // NSAIDs
        entry("ASPIRIN", "WARFARIN", Major, NSAID_ANTICOAGULANT),
        entry("IBUPROFEN", "LISINOPRIL", Moderate, NSAID_ACE),
        entry("IBUPROFEN", "ASPIRIN", Moderate, [
            "Ibuprofen may interfere with the cardioprotective effects of Aspirin.",
            "Competitive inhibition of COX-1.",
            "Reduced cardioprotection from Aspirin.",
            "Take Aspirin at least 30 minutes before or 8 hours after Ibuprofen.",
        ]),
        entry("NAPROXEN", "LISINOPRIL", Moderate, NSAID_ACE),
        entry("NAPROXEN", "WARFARIN", Major, NSAID_ANTICOAGULANT),
        // Statins
        entry("SIMVASTATIN", "GRAPEFRUIT", Major, [
            "Grapefruit juice increases simvastatin levels.",
            "Inhibition of CYP3A4 metabolism.",
            "Increased risk of myopathy and rhabdomyolysis.",
            "Avoid grapefruit juice.",
        ]),
        entry("ATORVASTATIN", "CLARITHROMYCIN", Major, [
            "Clarithromycin increases atorvastatin levels.",
            "Strong CYP3A4 inhibition.",
            "Increased risk of myopathy and rhabdomyolysis.",
            "Avoid combination or use lower statin dose.",
        ]),
        entry("SIMVASTATIN", "AMIODARONE", Major, [
            "Amiodarone increases simvastatin levels.",
            "Inhibition of CYP3A4.",
            "Increased risk of myopathy.",
            "Do not exceed 20mg Simvastatin daily.",
        ]),
        // Antibiotics
        entry("CIPROFLOXACIN", "TIZANIDINE", Major, [
            "Ciprofloxacin dramatically increases tizanidine levels.",
            "CYP1A2 inhibition.",
            "Hypotension, sedation, psychomotor impairment.",
            "Contraindicated. Avoid combination.",
        ]),
        entry("DOXYCYCLINE", "CALCIUM", Moderate, [
            "Calcium supplements decrease doxycycline absorption.",
            "Chelation complex formation.",
            "Reduced antibiotic efficacy.",
            "Separate doses by at least 2 hours.",
        ]),
        entry("METRONIDAZOLE", "ALCOHOL", Major, [
            "Disulfiram-like reaction.",
            "Inhibition of aldehyde dehydrogenase.",
            "Nausea, vomiting, flushing, tachycardia.",
            "Avoid alcohol during and for 3 days after therapy.",
        ]),
        // Opioids and sedatives
        entry("OXYCODONE", "ALCOHOL", Major, [
            "Additive CNS depression.",
            "Synergistic CNS depressant effects.",
            "Respiratory depression, sedation, coma.",
            "Avoid alcohol concurrently.",
        ]),
        entry("DIAZEPAM", "ALCOHOL", Major, [
            "Additive CNS depression.",
            "Synergistic CNS depressant effects.",
            "Respiratory depression, sedation.",
            "Avoid alcohol concurrently.",
        ]),
        // Antidepressants
        entry("FLUOXETINE", "TRAMADOL", Major, [
            "Risk of Serotonin Syndrome.",
            "Additive serotonergic effects and CYP2D6 inhibition.",
            "Serotonin syndrome, seizures, reduced tramadol efficacy.",
            "Monitor closely or avoid.",
        ]),
        entry("SERTRALINE", "ST. JOHN'S WORT", Major, [
            "Risk of Serotonin Syndrome.",
            "Additive serotonergic effects.",
            "Serotonin syndrome.",
            "Avoid combination.",
        ]),
        // Misc
        entry("ACETAMINOPHEN", "ALCOHOL", Major, [
            "Chronic alcohol use increases risk of hepatotoxicity.",
            "CYP2E1 induction increases toxic metabolite.",
            "Liver failure.",
            "Avoid chronic alcohol use.",
        ]),
        entry("WARFARIN", "VITAMIN K", Moderate, [
            "Vitamin K antagonizes warfarin effects.",
            "Direct antagonism.",
            "Reduced anticoagulation.",
            "Maintain consistent dietary intake.",
        ]),
        entry("LISINOPRIL", "POTASSIUM", Major, [
            "Risk of hyperkalemia.",
            "Additive potassium-retaining effects.",
            "Arrhythmias, cardiac arrest.",
            "Monitor potassium levels closely.",
        ]),
        entry("SILDENAFIL", "NITROGLYCERIN", Major, [
            "Severe hypotension.",
            "Synergistic vasodilation.",
            "Fatal hypotension, MI.",
            "Contraindicated.",
        ]),
    ]
}
