//! Outbound message catalog.
//!
//! Every text the bot can say lives here, one field per message, so a
//! `[templates]` config section can override any single one. Placeholders
//! use `{name}` syntax and are resolved at send time.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("unresolved placeholder `{{{0}}}`")]
    Unresolved(String),
    #[error("unterminated placeholder in template")]
    Unterminated,
}

/// Substitute `{key}` placeholders in `template`.
///
/// Placeholders are scanned from the template, not the substituted output,
/// so user-provided values containing braces never re-trigger resolution.
pub fn render(template: &str, values: &[(&str, &str)]) -> Result<String, RenderError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let end = after.find('}').ok_or(RenderError::Unterminated)?;
        let key = &after[..end];
        match values.iter().find(|(k, _)| *k == key) {
            Some((_, value)) => out.push_str(value),
            None => return Err(RenderError::Unresolved(key.to_string())),
        }
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

/// The full set of outbound texts, pre-filled with the production copy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MessageCatalog {
    /// Main menu, sent on greetings and after a decline.
    pub menu: String,
    /// Bidding consultancy info plus the yes/no representative ask.
    pub bidding_info: String,
    /// Construction-project consultancy info plus the yes/no ask.
    pub project_info: String,
    /// Notice sent when option 3 is chosen within attended hours.
    pub hours_open_notice: String,
    /// Notice sent when option 3 is chosen outside attended hours.
    pub hours_closed_notice: String,
    /// Name prompt for the direct representative flow.
    pub ask_name: String,
    /// Name prompt after a "si" on an informational topic.
    pub ask_name_affirmed: String,
    /// Email prompt.
    pub ask_email: String,
    /// Email prompt used by the bidding flow.
    pub ask_email_bidding: String,
    /// Inquiry prompt for the informational flows.
    pub ask_inquiry: String,
    /// Inquiry prompt for the representative flow.
    pub ask_inquiry_representative: String,
    /// Closing confirmation for the bidding and project flows.
    pub closing: String,
    /// Representative closing when a human is currently attending.
    pub closing_representative_open: String,
    /// Representative closing outside attended hours.
    pub closing_representative_closed: String,
    /// Acknowledgement of a "no", followed by the menu.
    pub decline_ack: String,
    /// Reply to anything unrecognized.
    pub fallback: String,
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self {
            menu: "¡Hola! Bienvenido(a) a Inted.\n\
                   Por favor, elige una de las siguientes opciones (escribe el número):\n\n\
                   1) Licitaciones\n\
                   2) Proyectos Constructivos\n\
                   3) Hablar con un representante\n\n\
                   Si en cualquier momento deseas volver al menú, escribe \"menu\"."
                .to_string(),
            bidding_info: "*Consultoría en Licitaciones Públicas y/o Privadas*\n\
                   Brindamos asesoramiento en todas las etapas: desde la documentación licitatoria hasta la ejecución del proyecto adjudicado.\n\n\
                   Para más información: https://inted-web.vercel.app/consultoria-licitaciones\n\n\
                   ¿Te gustaría hablar con un representante? Escribe \"SI\" o \"NO\"."
                .to_string(),
            project_info: "*Consultoría en Desarrollo de Proyectos Constructivos*\n\
                   Nuestro asesoramiento integral en la gestoría de trámites requeridos para la realización de proyectos constructivos.\n\n\
                   Para más información: https://inted-web.vercel.app/proyectos-constructivos\n\n\
                   ¿Te gustaría hablar con un representante? Escribe \"SI\" o \"NO\"."
                .to_string(),
            hours_open_notice:
                "Estamos *dentro* de nuestro horario de atención (Lunes a Viernes, {open}:00 a {close}:00)."
                    .to_string(),
            hours_closed_notice:
                "Estamos *fuera* de nuestro horario de atención (Lunes a Viernes, {open}:00 a {close}:00)."
                    .to_string(),
            ask_name: "Por favor, indícanos tu nombre completo:".to_string(),
            ask_name_affirmed: "¡Excelente! Primero, ¿podrías indicar tu nombre completo?"
                .to_string(),
            ask_email: "Gracias. ¿Podrías compartir tu dirección de email?".to_string(),
            ask_email_bidding: "Gracias. Ahora, ¿podrías compartir tu dirección de email?"
                .to_string(),
            ask_inquiry: "Por favor, cuéntanos tu consulta completa:".to_string(),
            ask_inquiry_representative:
                "Por favor, cuéntanos brevemente tu motivo de consulta:".to_string(),
            closing: "¡Perfecto, {name}! Hemos recibido tu consulta:\n\n\
                   \"{inquiry}\"\n\n\
                   Te contactaremos pronto. Gracias por comunicarte con Inted."
                .to_string(),
            closing_representative_open: "¡Perfecto, {name}!\n\
                   Hemos recibido tu información: \"{inquiry}\"\n\n\
                   En breve, un representante humano continuará la conversación contigo."
                .to_string(),
            closing_representative_closed: "¡Perfecto, {name}!\n\
                   Hemos recibido tu información: \"{inquiry}\"\n\n\
                   En cuanto estemos en horario, un representante se comunicará contigo."
                .to_string(),
            decline_ack: "Entendido. Volvamos al menú principal.".to_string(),
            fallback: "Lo siento, no reconozco esa opción.\n\
                   Si deseas volver al menú, escribe \"menu\".".to_string(),
        }
    }
}
