// ABOUTME: Prompt construction for proposal generation and chat
// ABOUTME: System instruction embeds the resolved template and tone, user prompt embeds the request fields

use crate::request::GenerateProposalRequest;

/// Used in place of template content when no template was resolved
pub const DEFAULT_TEMPLATE_INSTRUCTION: &str = "Create a standard business proposal structure";

pub const CHAT_SYSTEM_PROMPT: &str = "You are a professional business proposal assistant.
Help users with:
- Business proposal writing and advice
- Industry-specific guidance
- Template suggestions
- Professional communication tips
- Project scoping and planning

Be helpful, professional, and provide actionable advice. Keep responses concise but informative.";

pub fn proposal_system_prompt(template_content: Option<&str>, tone: &str) -> String {
    format!(
        "You are a professional proposal writer with expertise in business consulting.
Generate a comprehensive, well-structured proposal in Markdown format based on the provided information.

Guidelines:
- Use professional language matching the specified tone
- Include all sections: Executive Summary, Proposed Services, Project Objectives, Timeline & Investment, Next Steps
- Ensure the proposal is compelling and client-focused
- Format using proper Markdown headers and structure
- Keep it concise but comprehensive (800-1200 words)
- Include specific details from the input provided

Template to enhance (if provided): {}

Tone: {}",
        template_content.unwrap_or(DEFAULT_TEMPLATE_INSTRUCTION),
        tone
    )
}

pub fn proposal_user_prompt(request: &GenerateProposalRequest) -> String {
    let mut lines = vec![
        "Create a proposal for:".to_string(),
        format!("Client: {}", request.client_name),
        format!("Industry: {}", request.industry),
        format!("Services: {}", request.services_joined()),
        format!("Objectives: {}", request.objectives),
    ];
    if let Some(scope) = request.scope() {
        lines.push(format!("Scope: {}", scope));
    }
    lines.push(format!("Timeline: {}", request.timeline));
    lines.push(format!("Budget: {}", request.budget));
    lines.push(String::new());
    lines.push(
        "Generate a professional proposal that addresses these specific requirements.".to_string(),
    );

    lines.join("\n")
}
