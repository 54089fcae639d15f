//! # Topic Taxonomy Module
//!
//! ## Purpose
//! The fixed legal-subject taxonomy backing the topic classifier: keywords,
//! canned responses, follow-up suggestions, and legal-reference metadata for
//! each topic, plus the generic fallback family.
//!
//! The table is a struct-of-topics resolved at compile time: every field is
//! enumerated and the reference metadata is a tagged variant, so there is no
//! runtime key lookup into a dictionary-of-dictionaries. Content is static
//! and immutable during a request.

/// Legal-reference metadata attached to a topic's responses. Each topic
/// carries exactly one of these families.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicReference {
    /// Constitutional articles, laws, and decrees
    LegalArticles(&'static [&'static str]),
    /// Documents required to start a proceeding
    Requirements(&'static [&'static str]),
    /// Legal protections available to the person
    Protections(&'static [&'static str]),
    /// Applicable technical norms and regulations
    Regulations(&'static [&'static str]),
}

impl TopicReference {
    /// Spanish label used when the reference list is appended to a response.
    pub fn label(&self) -> &'static str {
        match self {
            TopicReference::LegalArticles(_) => "Marco legal",
            TopicReference::Requirements(_) => "Documentos necesarios",
            TopicReference::Protections(_) => "Protecciones legales",
            TopicReference::Regulations(_) => "Normativas aplicables",
        }
    }

    /// The reference items themselves.
    pub fn items(&self) -> &'static [&'static str] {
        match self {
            TopicReference::LegalArticles(items)
            | TopicReference::Requirements(items)
            | TopicReference::Protections(items)
            | TopicReference::Regulations(items) => items,
        }
    }
}

/// A fixed legal-subject category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    /// Stable identifier emitted in classification replies
    pub id: &'static str,
    /// Keyword set matched against query tokens (order irrelevant)
    pub keywords: &'static [&'static str],
    /// Canned response family; one is drawn per reply
    pub responses: &'static [&'static str],
    /// Follow-up suggestions shown with a reply on this topic
    pub suggestions: &'static [&'static str],
    /// Legal-reference metadata appended to every reply
    pub reference: TopicReference,
}

/// The five-topic taxonomy, in the fixed order that also breaks score ties
/// (first topic wins).
pub const TAXONOMY: &[Topic] = &[
    Topic {
        id: "discapacidad_derechos",
        keywords: &[
            "discapacidad",
            "derechos",
            "inclusion",
            "inclusión",
            "accesibilidad",
        ],
        responses: &[
            "Las personas con discapacidad tienen derecho a la igualdad de oportunidades y no discriminación según la Convención de la ONU.",
            "Tienes derecho a adaptaciones razonables en el trabajo, educación y servicios públicos.",
            "La accesibilidad universal es un derecho fundamental reconocido internacionalmente.",
        ],
        suggestions: &[
            "¿Necesitas información sobre certificación de discapacidad?",
            "¿Te interesa conocer sobre beneficios tributarios?",
            "¿Quieres saber sobre programas de inclusión social?",
        ],
        reference: TopicReference::LegalArticles(&[
            "Art. 14 Constitución",
            "Ley 1346 de 2009",
            "Decreto 1507 de 2014",
        ]),
    },
    Topic {
        id: "pension_discapacidad",
        keywords: &[
            "pension",
            "pensión",
            "invalidez",
            "incapacidad",
            "discapacidad",
            "beneficio",
        ],
        responses: &[
            "Para acceder a pensión por invalidez necesitas tener un grado de pérdida de capacidad laboral igual o superior al 50%.",
            "El proceso incluye evaluación médica, calificación de pérdida de capacidad laboral y solicitud ante el fondo de pensiones.",
            "Existen diferentes tipos: pensión de invalidez por enfermedad común, accidente de trabajo o enfermedad profesional.",
        ],
        suggestions: &[
            "¿Necesitas ayuda con el proceso de calificación?",
            "¿Quieres información sobre pensión de sobrevivientes?",
            "¿Te interesa conocer sobre indemnización sustitutiva?",
        ],
        reference: TopicReference::Requirements(&[
            "Certificado médico",
            "Historia clínica",
            "Exámenes complementarios",
            "Formulario de solicitud",
        ]),
    },
    Topic {
        id: "herencias_testamentos",
        keywords: &[
            "herencia",
            "testamento",
            "sucesion",
            "sucesión",
            "patrimonio",
        ],
        responses: &[
            "Las personas con discapacidad tienen derecho a la legítima ampliada para garantizar su protección patrimonial.",
            "Es recomendable establecer un fideicomiso o patrimonio autónomo para proteger los bienes del beneficiario.",
            "El testamento debe incluir disposiciones especiales para garantizar el cuidado y manutención de la persona con discapacidad.",
        ],
        suggestions: &[
            "¿Necesitas ayuda para redactar un testamento?",
            "¿Quieres información sobre planificación patrimonial?",
            "¿Te interesa conocer sobre fideicomisos?",
        ],
        reference: TopicReference::Protections(&[
            "Legítima ampliada",
            "Fideicomiso",
            "Patrimonio autónomo",
            "Sustitución fideicomisaria",
        ]),
    },
    Topic {
        id: "derechos_laborales",
        keywords: &[
            "trabajo",
            "empleo",
            "laboral",
            "discriminacion",
            "discriminación",
        ],
        responses: &[
            "Los empleadores deben realizar adaptaciones razonables del puesto de trabajo sin que esto represente una carga desproporcionada.",
            "Existe una cuota de empleo del 4% para personas con discapacidad en el sector público.",
            "La discriminación laboral por motivos de discapacidad está prohibida y es sancionable.",
        ],
        suggestions: &[
            "¿Has experimentado discriminación laboral?",
            "¿Necesitas información sobre adaptaciones del puesto?",
            "¿Quieres conocer sobre programas de empleo inclusivo?",
        ],
        reference: TopicReference::Protections(&[
            "Estabilidad laboral reforzada",
            "Adaptaciones razonables",
            "Cuota de empleo",
            "No discriminación",
        ]),
    },
    Topic {
        id: "accesibilidad",
        keywords: &[
            "accesibilidad",
            "barreras",
            "arquitectonicas",
            "arquitectónicas",
            "transporte",
            "rampa",
            "edificio",
            "acceso",
        ],
        responses: &[
            "Todos los espacios públicos y privados de uso público deben cumplir con normas de accesibilidad universal.",
            "Puedes presentar una acción de tutela si encuentras barreras arquitectónicas que limiten tu acceso.",
            "El transporte público debe ser accesible y contar con espacios preferenciales para personas con discapacidad.",
        ],
        suggestions: &[
            "¿Necesitas presentar una denuncia por barreras?",
            "¿Quieres información sobre diseño universal?",
            "¿Te interesa conocer sobre tecnologías de apoyo?",
        ],
        reference: TopicReference::Regulations(&[
            "NTC 4143",
            "NTC 4144",
            "Decreto 1538 de 2005",
            "Ley 361 de 1997",
        ]),
    },
];

/// Generic fallback responses used when no topic reaches the confidence
/// threshold.
pub const GENERAL_RESPONSES: &[&str] = &[
    "Entiendo tu consulta. Para brindarte la mejor asesoría, ¿podrías ser más específico sobre tu situación legal?",
    "Tu consulta es importante. Te recomiendo agendar una videollamada con uno de nuestros abogados especializados para una asesoría personalizada.",
    "Basándome en mi análisis, necesito más información para darte una respuesta precisa. ¿Puedes contarme más detalles sobre tu caso?",
    "Como asistente legal especializado en derechos de discapacidad, puedo ayudarte con temas de pensiones, herencias, derechos laborales y accesibilidad. ¿Cuál es tu consulta específica?",
];

/// Suggestions shown alongside a fallback reply.
pub const GENERAL_SUGGESTIONS: &[&str] = &[
    "¿Te gustaría agendar una videollamada con un abogado?",
    "¿Necesitas generar algún documento legal?",
    "¿Quieres más información sobre tus derechos?",
];

/// Look a topic up by identifier.
pub fn find(id: &str) -> Option<&'static Topic> {
    TAXONOMY.iter().find(|topic| topic.id == id)
}
