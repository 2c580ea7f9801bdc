// Prompt templates for the career tools.
// Placeholders in `{braces}` are filled in one pass by `fill_template` before sending.

/// Portfolio generation. Replace: {input_text}
pub const PORTFOLIO_PROMPT_TEMPLATE: &str = r#"Create a stunning, modern portfolio website using ONLY the REAL information provided in this resume/data. Do NOT use any placeholder content or sample data.

RESUME/DATA:
{input_text}

REQUIREMENTS:
1. Extract the ACTUAL name, contact info, skills, experience, projects, and education from the provided resume/data
2. Create a complete HTML file with embedded CSS
3. Use a modern, professional design with:
   - Beautiful typography (system fonts or web-safe fonts)
   - Smooth CSS transitions and hover effects
   - Professional color scheme with vibrant blues (#3b82f6, #1d4ed8) and complementary colors
   - Fully responsive design that works on all devices
   - Clean, modern layout with proper spacing
   - Subtle animations for better user experience

4. Include these sections with REAL content from the resume/data:
   - Header with actual name and contact information
   - Professional summary/about section using the actual summary
   - Skills section with the actual skills listed
   - Experience section with real job titles, companies, dates, and descriptions
   - Projects section with actual projects mentioned (if any)
   - Education section with real educational background
   - Contact section with the actual contact information

5. Design features to include:
   - Modern card-based design for projects and experience
   - Skill bars or tags for skills
   - Responsive navigation
   - Clean typography with proper hierarchy
   - Subtle shadows and modern styling

6. Make it production-ready - someone should be able to save this file and use it immediately as their portfolio website.

IMPORTANT: Use ONLY the actual information from the resume/data. Do not add fake projects, skills, or experience.

Return ONLY the complete HTML file with embedded CSS. Do not include any explanations or markdown formatting."#;

/// Cover letter. Replace: {resume}, {job_description}, {note}
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Create a cover letter based on:

RESUME: {resume}
JOB: {job_description}

Write a professional 3-paragraph cover letter that highlights relevant experience.

{note}"#;

/// Resume analysis. Replace: {resume}, {job_description}
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze resume vs job description:

RESUME: {resume}
JOB: {job_description}

Return a JSON object with this EXACT schema (no extra fields):
{
  "atsScore": 72,
  "strengths": ["..."],
  "improvements": ["..."],
  "missingKeywords": ["..."],
  "recommendations": ["..."]
}

Provide:
- ATS score (integer 0-100)
- 3 strengths
- 3 improvements
- 5 missing keywords
- 3 recommendations"#;

/// Resume enhancement. Replace: {resume}, {job_description}, {note}
pub const ENHANCE_PROMPT_TEMPLATE: &str = r#"Enhance this resume for the job:

RESUME: {resume}
JOB: {job_description}

Improve the resume by:
- Adding relevant keywords
- Strengthening bullet points
- Better formatting

{note}"#;

/// Interview answer feedback. Replace: {question}, {answer}, {role}
pub const INTERVIEW_FEEDBACK_PROMPT_TEMPLATE: &str = r#"Provide feedback on this interview answer:

QUESTION: {question}
ANSWER: {answer}
ROLE: {role}

Give constructive feedback on clarity, relevance, and improvement areas."#;

/// Interview question generation. Replace: {role}, {job_section}
pub const INTERVIEW_QUESTIONS_PROMPT_TEMPLATE: &str = r#"Generate 6 interview questions for {role} position.

{job_section}

Include technical, behavioral, and situational questions.
Put each question on its own line with no other text."#;
