//! Built-in guide content: sections, quiz questions, reference posology,
//! abbreviation glossary and committee rosters.
//!
//! Content is immutable and built once at first use.

use crate::types::*;
use once_cell::sync::Lazy;

/// Cached guide content - built once and reused across all operations
static GUIDE_CONTENT: Lazy<GuideContent> = Lazy::new(build_guide_content_internal);

/// Get a reference to the cached guide content
pub fn guide_content() -> &'static GuideContent {
    &GUIDE_CONTENT
}

/// Builds the guide content tables
///
/// **Note**: For production use, prefer `guide_content()` which returns a
/// cached reference. This function is retained for testing.
pub fn build_guide_content() -> GuideContent {
    build_guide_content_internal()
}

fn build_guide_content_internal() -> GuideContent {
    // ========================================================================
    // Sections
    // ========================================================================

    let sections = vec![
        Section { id: SectionId::Epidemiologie, label: "Épidémiologie".into(), icon: "📊".into() },
        Section { id: SectionId::Diagnostic, label: "Diagnostic".into(), icon: "🔍".into() },
        Section { id: SectionId::Traitement, label: "Traitement".into(), icon: "💊".into() },
        Section { id: SectionId::Calculateur, label: "Calculateur".into(), icon: "🧮".into() },
        Section { id: SectionId::Suivi, label: "Suivi".into(), icon: "📅".into() },
        Section { id: SectionId::CasParticuliers, label: "Cas Particuliers".into(), icon: "👥".into() },
        Section { id: SectionId::Resistance, label: "Tuberculose résistante".into(), icon: "⚠️".into() },
        Section { id: SectionId::InfectionLatente, label: "Infection Latente".into(), icon: "🤫".into() },
        Section { id: SectionId::Quiz, label: "Quiz".into(), icon: "🧠".into() },
        Section { id: SectionId::References, label: "Références".into(), icon: "📚".into() },
    ];

    // ========================================================================
    // Quiz Questions
    // ========================================================================

    let quiz = vec![
        QuizQuestion {
            question: "Quelle est la durée minimale de toux pour suspecter une tuberculose ?".into(),
            options: vec!["1 semaine".into(), "2-3 semaines".into(), "1 mois".into(), "6 semaines".into()],
            correct: 1,
            explanation: "Une toux productive persistant 2-3 semaines ou plus doit faire suspecter une tuberculose.".into(),
        },
        QuizQuestion {
            question: "Quel est le schéma thérapeutique standard pour un nouveau cas de TB pulmonaire ?".into(),
            options: vec!["6HRZE".into(), "2HRZE/4HR".into(), "9HR".into(), "2HRZ/4HR".into()],
            correct: 1,
            explanation: "Le schéma standard est 2HRZE (2 mois) suivi de 4HR (4 mois), soit 6 mois au total.".into(),
        },
        QuizQuestion {
            question: "Quelle est la sensibilité du Gene Xpert MTB/RIF chez un patient BAAR+ ?".into(),
            options: vec!["50%".into(), "75%".into(), ">95%".into(), "100%".into()],
            correct: 2,
            explanation: "La sensibilité du Gene Xpert MTB/RIF est supérieure à 95% chez les patients BAAR+.".into(),
        },
        QuizQuestion {
            question: "En cas de co-infection TB-VIH, quel traitement débuter en premier ?".into(),
            options: vec![
                "Antirétroviraux".into(),
                "Antituberculeux".into(),
                "Les deux simultanément".into(),
                "Dépend du taux de CD4".into(),
            ],
            correct: 1,
            explanation: "Il faut TOUJOURS débuter le traitement antituberculeux en premier, puis introduire les ARV selon le taux de CD4.".into(),
        },
        QuizQuestion {
            question: "Quelle est la durée du traitement pour une tuberculose neuro-méningée ?".into(),
            options: vec!["6 mois".into(), "9 mois".into(), "12 mois".into(), "18 mois".into()],
            correct: 2,
            explanation: "La tuberculose neuro-méningée nécessite 12 mois de traitement : 2HRZE/10HR.".into(),
        },
        QuizQuestion {
            question: "Quel pourcentage de TB ganglionnaire est dû à M. bovis en Tunisie ?".into(),
            options: vec!["45%".into(), "60%".into(), "78,9%".into(), "85%".into()],
            correct: 2,
            explanation: "Selon le guide PNLT 2025, M. bovis est responsable de 78,9% des cas de tuberculose ganglionnaire en Tunisie.".into(),
        },
    ];

    // ========================================================================
    // Reference Posology
    // ========================================================================

    let posology = vec![
        DrugReference {
            name: "Isoniazide (H)".into(),
            adult_dose: "3-5 mg/kg/j".into(),
            child_dose: "10 mg/kg/j".into(),
            max_dose: "300 mg/j".into(),
        },
        DrugReference {
            name: "Rifampicine (R)".into(),
            adult_dose: "10 mg/kg/j".into(),
            child_dose: "15-20 mg/kg/j".into(),
            max_dose: "600 mg/j".into(),
        },
        DrugReference {
            name: "Pyrazinamide (Z)".into(),
            adult_dose: "30 mg/kg/j".into(),
            child_dose: "35 mg/kg/j".into(),
            max_dose: "2500 mg/j".into(),
        },
        DrugReference {
            name: "Éthambutol (E)".into(),
            adult_dose: "20 mg/kg/j".into(),
            child_dose: "20 mg/kg/j".into(),
            max_dose: "1600 mg/j".into(),
        },
    ];

    // ========================================================================
    // Abbreviations
    // ========================================================================

    let abbreviations: Vec<Abbreviation> = [
        ("ALT", "Alanine-aminotransférase"),
        ("AST", "Aspartate aminotransférase"),
        ("BAAR", "Bacilles acido-alcoolo-résistants"),
        ("BCG", "Bacille de Calmette et Guérin"),
        ("CDC", "Centres de prévention et de contrôle des maladies"),
        ("CQE", "Contrôle de qualité externe"),
        ("DAT", "Dispensaire anti-tuberculeux"),
        ("DOT", "Directly Observed Treatment"),
        ("DPP", "Dérivé protéinique purifié"),
        ("DST", "Drug sensitivity testing (antibiogramme)"),
        ("IDR", "Intradermo-Réaction"),
        ("INNTI", "Inhibiteurs non nucléosidiques de la transcriptase inverse"),
        ("INTI", "Inhibiteurs nucléosidiques de la transcriptase inverse"),
        ("IRIS", "Immune Reconstitution Inflammatory Syndrome (Syndrome inflammatoire de reconstitution immunitaire)"),
        ("ITL", "Infection tuberculeuse latente"),
        ("LAT", "Lutte antituberculeuse"),
        ("MAMT", "Mycobactérie Autre que Mycobacterium Tuberculosis"),
        ("NVP", "Névirapine"),
        ("OMD", "Objectif du millénaire pour le développement"),
        ("OMS", "Organisation mondiale de la Santé"),
        ("ONUSIDA", "Programme commun des Nations Unies sur le VIH/sida"),
        ("PCIME", "Prise en charge intégrée des maladies de l'enfant"),
        ("PNLT", "Programme national de lutte contre la tuberculose"),
        ("PPC", "Pneumonie à Pneumocystis Jirovecii"),
        ("PVVIH", "Personnes vivant avec le VIH/SIDA"),
        ("SIDA", "Syndrome d'immunodéficience acquise"),
        ("SITT", "Standards internationaux pour le traitement de la tuberculose"),
        ("SL-LPA", "Second-Line Line Probe Assays"),
        ("TAR", "Traitement antirétroviral Tuberculose"),
        ("TBC", "Tuberculose"),
        ("TB-MR", "Tuberculose multirésistante (en anglais MDR-TB)"),
        ("TB-rH", "Tuberculose résistante à l'isoniazide (en anglais Hr-TB)"),
        ("TB-RR", "Tuberculose résistante à la rifampicine (en anglais RR-TB)"),
        ("TB-UR", "Tuberculose ultrarésistante (en anglais XDR)"),
        ("TBEP", "Tuberculose extra-pulmonaire"),
        ("TBP", "Tuberculose pulmonaire"),
        ("TCT", "Test cutané à la tuberculine"),
        ("TOD", "Traitement sous observation directe (en anglais DOT)"),
        ("TPI", "Traitement préventif à l'isoniazide"),
        ("UICTMR", "Union Internationale Contre la Tuberculose et les Maladies Respiratoires"),
        ("VIH", "Virus de l'immunodéficience humaine"),
    ]
    .into_iter()
    .map(|(term, definition)| Abbreviation {
        term: term.into(),
        definition: definition.into(),
    })
    .collect();

    // ========================================================================
    // Committees
    // ========================================================================

    let committees = Committees {
        presidente: "TRITAR Fatma".into(),
        coordinateur: "MANSOURI Abderraouf".into(),
        conception: "SOUISSI Zouhair".into(),
        redaction: [
            "ABDELMLEK Rim", "AISSA Sana", "AOUINTITI Imen", "AYADI Hajer",
            "BEJI Imen", "BEN AMMAR Jihene", "BEN MANSOUR Amani", "BEN ZAZIA Rahma",
            "BERRICHE Aida", "BEN SAAD Soumaya", "CHAHED Houda", "FOURATI Rachid",
            "GARGOURI Rahma", "GHARIANI Asma", "HABOURIA Chaima", "HAMDI Besma",
            "HAMOUDA Samia", "HAMZAOUI Saloua", "HANTOUS Saoussen", "JOOBER Sameh",
            "HEMISSI Khaoula", "KASTALLI Sarra", "KHALSI Fatma", "KHAMESSI Madiha",
            "KHEMEKHEM Rim", "KWASS Hamida", "LOUHAICHI Sabrine", "MAALEJ Sonia",
            "MANSOURI Abderraouf", "Mehiri Emna", "MEJRI Islem", "MOUSSA Ines",
            "NEJI Henda", "REJEIBI Salsabil", "ROMDHANE Nadia", "SMAOUI Selma",
            "SNENE Houda", "TRITAR Fatma", "YENGUI Ferdaous", "ZAIBI Haifa",
            "ZOGHLAMI Imen",
        ]
        .into_iter()
        .map(String::from)
        .collect(),
        lecture: [
            "ABDALLAH Maya", "AIDLI Sihem", "AKROUT Feriel", "BEJI Majed",
            "BEN KHEDER Ali", "BOUACHA Hind", "BOUSSETTA Khadija", "DAGHFOUS Hafaoua",
            "DRIRA Ikram", "EL GHARBI Leila", "GHRAIRI Hédia", "HAMZAOUI Agnès",
            "HAMMAMI Boutheina", "KAMOUN Samy", "KHEMIRI Monia", "KILANI Badreddine",
            "LOUZIR Béchir", "MBAREK Chiraz", "MOOTEMRI Zied", "Rezaig CHEIKH",
            "SAHTOUT Samia", "SAID Yosra", "SLIM Leila", "SOUISSI Zouhair",
            "TIOUIRI Hanène", "TOUMI Adnene", "ZARROUK Mourad",
        ]
        .into_iter()
        .map(String::from)
        .collect(),
    };

    GuideContent {
        sections,
        quiz,
        posology,
        abbreviations,
        committees,
    }
}

impl GuideContent {
    /// Validate the content for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let mut seen_ids = std::collections::HashSet::new();
        for section in &self.sections {
            if !seen_ids.insert(section.id) {
                errors.push(format!("Duplicate section id {:?}", section.id));
            }
            if section.label.is_empty() {
                errors.push(format!("Section {:?} has empty label", section.id));
            }
        }

        for (index, question) in self.quiz.iter().enumerate() {
            if question.question.is_empty() {
                errors.push(format!("Quiz question {} has empty text", index));
            }
            if question.options.len() < 2 {
                errors.push(format!(
                    "Quiz question {} has {} option(s), need at least 2",
                    index,
                    question.options.len()
                ));
            }
            if question.correct >= question.options.len() {
                errors.push(format!(
                    "Quiz question {}: correct index {} out of range ({} options)",
                    index,
                    question.correct,
                    question.options.len()
                ));
            }
            if question.explanation.is_empty() {
                errors.push(format!("Quiz question {} has empty explanation", index));
            }
        }

        for drug in &self.posology {
            if drug.name.is_empty() {
                errors.push("Posology entry has empty drug name".to_string());
            }
        }

        let mut seen_terms = std::collections::HashSet::new();
        for abbreviation in &self.abbreviations {
            if abbreviation.term.is_empty() || abbreviation.definition.is_empty() {
                errors.push("Abbreviation entry has empty term or definition".to_string());
            }
            if !seen_terms.insert(abbreviation.term.clone()) {
                errors.push(format!("Duplicate abbreviation term '{}'", abbreviation.term));
            }
        }

        if self.committees.redaction.is_empty() {
            errors.push("Comité de rédaction is empty".to_string());
        }
        if self.committees.lecture.is_empty() {
            errors.push("Comité de lecture is empty".to_string());
        }

        errors
    }

    /// Look up a section by its slug
    pub fn section(&self, id: SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }
}
