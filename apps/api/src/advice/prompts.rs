// All LLM prompt constants for the Advice module.
// The persona lives in llm_client::prompts and is sent as the system instruction.

/// Profile block shared by every mode.
/// Replace: {name}, {interests}, {skills}, {education}, {goals}
pub const PROFILE_TEMPLATE: &str = r#"You are an expert career counselor mentoring a B.Tech student in India.

User profile:
- Name: {name}
- Interests: {interests}
- Skills: {skills}
- Education: {education}
- Career Goals: {goals}"#;

/// Optional preferences block.
/// Replace: {preferred_roles}, {target_domain}, {location_preference},
///          {work_style}, {risk_preference}, {priority}, {notes}
pub const PREFERENCES_TEMPLATE: &str = r#"Additional preferences:
- Preferred Roles: {preferred_roles}
- Target Domain: {target_domain}
- Location Preference: {location_preference}
- Work Style: {work_style}
- Risk Preference: {risk_preference}
- Priority: {priority}
- Notes: {notes}"#;

/// Full guidance: career paths, roadmap, salary, resources, resume and interview tips.
pub const CAREER_TASK: &str = r#"TASK:
1. Suggest **4 specific career paths** suitable for this profile.
   For EACH career path, include:
   - Job Title
   - Short description (India context)
   - Required technical skills
   - Required soft skills
   - Skill gap: what is missing from current skills
   - 3–5 step roadmap (projects, courses, internships)
   - Average salary in INR (junior level, approximate)
   - Remote / onsite / hybrid options

2. Then give **General Guidance**:
   - How to improve skills (free + paid resources)
   - Resume & GitHub tips for freshers
   - Networking tips (LinkedIn, hackathons, meetups)
   - Interview preparation tips for Indian companies"#;

/// Skill-gap analysis against the stated goals.
pub const SKILLS_TASK: &str = r#"TASK:
1. Compare the current skills against what the career goals require.
   - List the skills the user already has that are relevant
   - List the **missing skills**, ordered by priority
   - For each missing skill, explain why it matters for the goal

2. Build a **step-by-step learning plan** (8–12 weeks):
   - Weekly milestones with one hands-on project per phase
   - Free and paid learning resources for each skill
   - How to prove each skill on a resume or GitHub"#;

/// Interview preparation for the target role.
pub const INTERVIEW_TASK: &str = r#"TASK:
1. Identify the **2 most likely target roles** for this profile.

2. For EACH role, prepare the user for interviews at Indian companies:
   - 10 likely technical questions with short model answers
   - 5 likely HR / behavioural questions with answering tips
   - Core topics to revise, in priority order
   - Typical interview rounds and what each one tests

3. Then give **Resume & Preparation Tips**:
   - How to present projects and internships on the resume
   - A 2-week mock interview plan
   - Common mistakes freshers make and how to avoid them"#;

/// Compact at-a-glance comparison.
pub const CHART_TASK: &str = r#"TASK:
Give a **quick overview** of 4 suitable career roles as a single Markdown table with columns:
| Role | Fit (High/Medium/Low) | Key Skills Needed | Skill Gap | Junior Salary (INR) | Work Mode |

After the table, add at most 3 bullet points naming the single best next step for this user."#;

/// Output formatting rules appended to every mode.
pub const FORMAT_INSTRUCTION: &str = r#"FORMAT:
- Use Markdown with proper headings (##, ###).
- Use bullet points (•) and sub-bullets where helpful.
- Be clear, practical and motivating."#;
