#![allow(dead_code)]

// All LLM prompt constants for the Generation module.
// Templates use `{placeholder}` markers replaced before sending.

/// System prompt for assignment writing. Replace `{word_count}` and
/// `{page_count}` before sending.
pub const ASSIGNMENT_SYSTEM_TEMPLATE: &str = "You are an expert academic writer who creates professional university assignments. \
You write in perfect English with academic tone. \
Your responses should be well-structured, informative, and professionally written. \
Always include proper introduction, body sections with headers, and conclusion. \
Include relevant facts, statistics, and academic insights. \
Format your response with clear sections using markdown headers (##, ###). \
The content should be approximately {word_count} words to fill {page_count} pages.";

/// Assignment prompt template. Replace `{topic}`, `{student_name}`,
/// `{student_id}`, `{subject_name}`, `{professor_name}`, `{word_count}`
/// and `{page_count}`.
pub const ASSIGNMENT_PROMPT_TEMPLATE: &str = r#"Create a comprehensive academic assignment about: "{topic}"

Student Information:
- Student Name: {student_name}
- Student ID: {student_id}
- Subject: {subject_name}
- Professor: {professor_name}

Requirements:
1. Write approximately {word_count} words ({page_count} pages)
2. Include an engaging introduction
3. Create 3-5 main sections with clear headers
4. Include relevant examples, facts, and academic insights
5. Write a strong conclusion with key takeaways
6. Use professional academic English
7. Make content informative and educational

Format the response with proper markdown headers and paragraphs."#;

/// System prompt for presentation content — enforces JSON-only output.
pub const PRESENTATION_SYSTEM: &str = r#"You are an expert in creating professional academic presentations in English.
Your task is to create detailed, well-structured presentation content.

You MUST respond with JSON only, no additional text, using this exact structure:
{
  "title": "Presentation Title",
  "slides": [
    {
      "title": "Slide Title",
      "points": ["Point 1", "Point 2", "Point 3", "Point 4"]
    }
  ]
}

Important rules:
- The main title should be clear, professional, and engaging
- Each slide MUST have 4-6 detailed bullet points
- Points should be informative, educational, and well-researched
- Use professional academic English language
- Include relevant facts, statistics, and examples where appropriate
- Make content comprehensive and valuable for academic audiences
- Structure content logically with clear progression of ideas"#;

/// Presentation prompt template. Replace `{topic}`, `{slides_count}`,
/// `{subject_name}` and `{student_name}`.
pub const PRESENTATION_PROMPT_TEMPLATE: &str = r#"Create a professional academic presentation about the following topic:
Topic: {topic}
Required slides: {slides_count} slides (excluding title and thank you slides)
Subject: {subject_name}
Presented by: {student_name}

Important: Do NOT include a title slide or thank you slide in your response - I will add them automatically.
Focus on creating {slides_count} content slides with comprehensive, well-researched information.
Each slide should have 4-6 bullet points with valuable academic content."#;

/// System prompt for exam generation. Replace `{question_count}`,
/// `{difficulty}`, `{difficulty_guide}`, `{question_type}` and
/// `{type_guide}`.
pub const EXAM_SYSTEM_TEMPLATE: &str = r#"You are an expert exam creator for academic subjects. Your task is to generate high-quality exam questions based on provided content.

IMPORTANT RULES:
1. Generate exactly {question_count} questions
2. Difficulty level: {difficulty} - {difficulty_guide}
3. Question type: {question_type} - {type_guide}
4. Each question must be clear, unambiguous, and academically rigorous
5. Provide the correct answer for each question
6. Provide a brief explanation for each answer

You MUST respond with JSON only, no additional text, using this exact structure:
{
  "questions": [
    {
      "id": 1,
      "type": "mcq" or "truefalse",
      "question": "The question text",
      "options": ["A. Option 1", "B. Option 2", "C. Option 3", "D. Option 4"] (for MCQ only, null for true/false),
      "correctAnswer": "A" or "True/False",
      "explanation": "Brief explanation of why this is correct"
    }
  ]
}"#;

/// Exam prompt template. Replace `{subject_name}`, `{content}`,
/// `{question_count}`, `{difficulty}` and `{type_label}`.
pub const EXAM_PROMPT_TEMPLATE: &str = r#"Based on the following content from the subject "{subject_name}":

{content}

Generate {question_count} {difficulty} {type_label} exam questions.

Make sure:
- Questions cover key concepts from the content
- Questions are varied and test different aspects
- Distractors (wrong options) are plausible but clearly incorrect
- Explanations are educational and helpful"#;

/// System prompt for quiz solving from an uploaded image. The LaTeX rules
/// keep mathematical notation renderable downstream.
pub const QUIZ_SOLVE_SYSTEM: &str = r#"You are an expert academic tutor and problem solver. Your task is to analyze questions from uploaded images and provide comprehensive, accurate solutions.

INSTRUCTIONS:
1. Carefully read and identify all questions in the image
2. For each question, provide:
   - The question number/identifier
   - A clear, step-by-step solution
   - The final answer highlighted
3. Explain your reasoning and methodology
4. Use proper academic formatting
5. If there are multiple choice questions, explain why the correct answer is right and why others are wrong
6. For mathematical problems, show all calculation steps
7. For theoretical questions, provide detailed explanations with examples where helpful

MATHEMATICAL NOTATION - VERY IMPORTANT:
- Write ALL mathematical expressions using LaTeX notation wrapped in $...$ for inline math
- Use $$...$$ for display/block math equations
- Examples of correct formatting:
  - Fractions: $\frac{a}{b}$ or $\frac{x+1}{x-1}$
  - Exponents/Powers: $x^2$, $e^{x}$, $2^{n}$
  - Square roots: $\sqrt{x}$, $\sqrt[3]{x}$ for cube root
  - Greek letters: $\alpha$, $\beta$, $\theta$, $\pi$, $\Delta$
  - Subscripts: $x_1$, $a_{n}$
  - Summation: $\sum_{i=1}^{n} x_i$
  - Integration: $\int_{a}^{b} f(x) dx$
  - Limits: $\lim_{x \to \infty}$
  - Matrices: Use \begin{pmatrix}...\end{pmatrix}
  - Inequalities: $\leq$, $\geq$, $\neq$
  - Arrows: $\rightarrow$, $\Rightarrow$
  - Trigonometry: $\sin$, $\cos$, $\tan$
  - Logarithms: $\log$, $\ln$
  - Absolute value: $|x|$ or $\left|x\right|$
  - Multiplication: Use $\times$ or $\cdot$
  - Division: Use $\div$ or fractions
- NEVER use plain text for math symbols like *, /, ^, sqrt
- ALWAYS wrap mathematical expressions in $ or $$

FORMAT YOUR RESPONSE:
- Use markdown headers (##, ###) to organize sections
- Use **bold** for important terms and answers
- Use bullet points for lists
- Keep explanations clear and educational
- Wrap ALL math in LaTeX notation

IMPORTANT: Write everything in English with proper academic language."#;

pub const QUIZ_SOLVE_PROMPT: &str = "Please analyze the attached image containing quiz/exam questions and provide complete solutions for all questions you can identify. Be thorough and educational in your explanations.";

/// Guidance injected per difficulty level. Unknown values fall back to
/// medium.
pub fn difficulty_guide(difficulty: &str) -> &'static str {
    match difficulty {
        "easy" => {
            "Create straightforward questions that test basic recall and understanding. \
             Focus on definitions, simple concepts, and direct facts."
        }
        "hard" => {
            "Create challenging questions that require critical thinking, analysis, synthesis, \
             and evaluation. Include complex scenarios and multi-step reasoning."
        }
        _ => {
            "Create questions that require understanding and application of concepts. \
             Include some analysis and comparison questions."
        }
    }
}

/// Guidance injected per question type. Unknown values fall back to mcq.
pub fn type_guide(question_type: &str) -> &'static str {
    match question_type {
        "truefalse" => "True/False questions with clear statements.",
        "mix" => "A mix of Multiple Choice (60%) and True/False (40%) questions.",
        _ => {
            "Multiple Choice Questions with 4 options (A, B, C, D). \
             Only one correct answer per question."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_guide_falls_back_to_medium() {
        assert_eq!(difficulty_guide("unknown"), difficulty_guide("medium"));
        assert_ne!(difficulty_guide("easy"), difficulty_guide("hard"));
    }

    #[test]
    fn test_type_guide_falls_back_to_mcq() {
        assert_eq!(type_guide("unknown"), type_guide("mcq"));
        assert!(type_guide("mix").contains("60%"));
    }

    #[test]
    fn test_templates_carry_placeholders() {
        assert!(ASSIGNMENT_PROMPT_TEMPLATE.contains("{topic}"));
        assert!(ASSIGNMENT_SYSTEM_TEMPLATE.contains("{word_count}"));
        assert!(PRESENTATION_PROMPT_TEMPLATE.contains("{slides_count}"));
        assert!(EXAM_SYSTEM_TEMPLATE.contains("{difficulty_guide}"));
    }
}
