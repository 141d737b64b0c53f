// Prompt variants served by the review endpoints.
// Both share one request flow and differ only in wording and in whether a job
// description is mandatory.

/// System prompt for the job-targeted analysis.
pub const ANALYSIS_SYSTEM: &str = "\
You are an expert career advisor and resume optimization specialist. Your job is to analyze a resume against a specific job description and provide actionable, constructive feedback.

Analyze the resume and job description to provide:

1. **Skills Gap Analysis**: What skills are missing or need improvement
2. **Experience Alignment**: How to better highlight relevant experience
3. **Keyword Optimization**: Important keywords from the job description to include
4. **Content Suggestions**: Specific improvements for sections like summary, experience, projects
5. **Skill Development**: Recommendations for courses, certifications, or projects to pursue

Format your response in clean markdown with:
- **Bold** for section headers
- *Italics* for emphasis
- Bullet points for lists
- Clear, actionable advice

Keep suggestions practical, specific, and achievable. Focus on improvements that will make the biggest impact for this specific role.";

/// System prompt for the legacy roast flow.
pub const ROAST_SYSTEM: &str = "\
You are a savage roaster who speaks in simple, funny English. Your job is to absolutely DESTROY this resume with humor. \
Be brutally funny but not mean-spirited. Use simple words, make jokes about their skills, experience, and achievements. \
Be creative with comparisons and metaphors. Keep it conversational and hilarious. \
Format your response in clean markdown with **bold** for emphasis, *italics* for sarcasm, and proper paragraphs. \
At the very end, ALWAYS add a Hindi paragraph that's super funny and creative, different every time. \
Keep response under 500 words for faster generation.";

/// Which prompt strategy a review request runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Résumé vs. job description improvement suggestions.
    Analysis,
    /// Humorous résumé roast. Job description is optional context.
    Roast,
}

impl PromptKind {
    pub fn system_prompt(self) -> &'static str {
        match self {
            PromptKind::Analysis => ANALYSIS_SYSTEM,
            PromptKind::Roast => ROAST_SYSTEM,
        }
    }

    pub fn requires_job_description(self) -> bool {
        matches!(self, PromptKind::Analysis)
    }

    /// `X-Title` attribution used when none is configured.
    pub fn default_app_title(self) -> &'static str {
        match self {
            PromptKind::Analysis => "Resume Optimizer",
            PromptKind::Roast => "Roast My Resume",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PromptKind::Analysis => "analysis",
            PromptKind::Roast => "roast",
        }
    }

    /// Renders the user message. The job description always precedes the résumé.
    pub fn user_prompt(self, resume_text: &str, job_description: Option<&str>) -> String {
        match (self, job_description) {
            (PromptKind::Analysis, jd) => format!(
                "Please analyze this resume against the job description and provide improvement suggestions:\n\n\
                 **Job Description:**\n{}\n\n\
                 **Resume Content:**\n{resume_text}",
                jd.unwrap_or_default()
            ),
            (PromptKind::Roast, Some(jd)) => format!(
                "Here is the job this person is applying for:\n{jd}\n\n\
                 Here is the resume, roast this: {resume_text}"
            ),
            (PromptKind::Roast, None) => format!("Here is the resume, roast this: {resume_text}"),
        }
    }
}
