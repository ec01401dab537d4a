//! The tech career board that ships with the tool.
//!
//! A hybrid weekly sprint: four sprint columns for execution, then reference
//! lists for long-term strategy and resources, then an archive column.

use planner_core::domain::{BoardTemplate, CardTemplate, LabelColor, ListTemplate};

pub const BUILTIN_NAME: &str = "Tech Career Planning";

const HIGH_PRIORITY: &str = "High Priority";
const QUICK_WIN: &str = "Quick Win";
const LEARNING: &str = "Learning";
const NETWORKING: &str = "Networking";
const CAREER_GOAL: &str = "Career Goal";
const BLOCKED: &str = "Blocked";

/// Build the built-in template. Always passes [`BoardTemplate::validate`].
pub fn builtin_template() -> BoardTemplate {
    BoardTemplate::new(
        BUILTIN_NAME,
        "A hybrid weekly sprint board for tech career development. Use sprint columns \
         (Backlog → This Week → In Progress → Done) for weekly execution, with reference \
         lists for long-term strategy and resources.",
    )
    .with_label(HIGH_PRIORITY, LabelColor::Red)
    .with_label(QUICK_WIN, LabelColor::Green)
    .with_label(LEARNING, LabelColor::Blue)
    .with_label(NETWORKING, LabelColor::Purple)
    .with_label(CAREER_GOAL, LabelColor::Orange)
    .with_label(BLOCKED, LabelColor::Yellow)
    .with_list(sprint_backlog())
    .with_list(
        ListTemplate::new("This Week")
            .with_card(card(
                "Complete 3 LeetCode Problems",
                "Solve at least 3 coding problems. Focus on data structures and algorithms \
                 relevant to interview prep.",
                &[LEARNING, QUICK_WIN],
            ))
            .with_card(card(
                "Send 2 Networking Messages",
                "Reach out to 2 industry professionals with personalized connection requests \
                 or follow-up messages.",
                &[NETWORKING, QUICK_WIN],
            ))
            .with_card(card(
                "Study 2 Hours for Certification",
                "Dedicate focused study time toward your target certification. Take notes and \
                 complete practice questions.",
                &[LEARNING],
            )),
    )
    .with_list(ListTemplate::new("In Progress").with_card(card(
        "Example: Currently Active Task",
        "Move cards here when you start actively working on them. Limit work in progress \
         to 2-3 items for focus.",
        &[],
    )))
    .with_list(ListTemplate::new("Blocked / Review").with_card(card(
        "Example: Blocked Task",
        "Move cards here if they're blocked by external dependencies or waiting for \
         review/feedback. Add a comment explaining the blocker.",
        &[BLOCKED],
    )))
    .with_list(ListTemplate::new("Done This Week").with_card(card(
        "Example: Completed Task",
        "Move completed tasks here. At the end of each week, review accomplishments and \
         archive to Completed.",
        &[QUICK_WIN],
    )))
    .with_list(strategy())
    .with_list(learning_resources())
    .with_list(ListTemplate::new("Completed").with_card(card(
        "Archive completed items here",
        "At the end of each week, move items from 'Done This Week' here. Review monthly to \
         celebrate progress!",
        &[QUICK_WIN],
    )))
}

fn sprint_backlog() -> ListTemplate {
    ListTemplate::new("Sprint Backlog")
        .with_card(card(
            "Define 1-Year Career Vision",
            "Write a clear statement of where you want to be in your tech career one year \
             from now. Include target role, skills, and company type.",
            &[CAREER_GOAL, HIGH_PRIORITY],
        ))
        .with_card(card(
            "Skills Gap Analysis",
            "Compare your current skills against requirements for target roles. Identify the \
             most critical gaps to address.",
            &[CAREER_GOAL, HIGH_PRIORITY],
        ))
        .with_card(card(
            "Update LinkedIn Profile",
            "Update headline, summary, experience sections. Add skills, get endorsements, and \
             request recommendations.",
            &[NETWORKING, QUICK_WIN],
        ))
        .with_card(card(
            "Research Target Companies",
            "Create a list of target companies. Research their culture, tech stack, interview \
             process, and recent news.",
            &[CAREER_GOAL],
        ))
        .with_card(card(
            "Start Certification Study",
            "Begin studying for a relevant certification (AWS, GCP, Azure, Kubernetes, etc.) \
             that aligns with your career goals.",
            &[LEARNING, HIGH_PRIORITY],
        ))
        .with_card(card(
            "Build Side Project",
            "Define and start a side project that demonstrates skills relevant to your target \
             roles. Aim for GitHub portfolio visibility.",
            &[LEARNING],
        ))
}

fn strategy() -> ListTemplate {
    ListTemplate::new("Career Goals & Strategy")
        .with_card(card(
            "Target Roles List",
            "3-5 specific job titles that align with your career goals, with required \
             qualifications for each.",
            &[CAREER_GOAL],
        ))
        .with_card(card(
            "5-Year Career Vision",
            "Long-term career aspirations: leadership vs IC path, specialization areas, \
             industry focus, and compensation goals.",
            &[CAREER_GOAL],
        ))
        .with_card(card(
            "Technical Skills Inventory",
            "Current technical skills with proficiency levels. Update quarterly to track \
             growth.",
            &[CAREER_GOAL],
        ))
        .with_card(card(
            "Networking Strategy",
            "Key communities to join, mentors to find, content creation plans for thought \
             leadership.",
            &[NETWORKING, CAREER_GOAL],
        ))
}

fn learning_resources() -> ListTemplate {
    ListTemplate::new("Learning Resources")
        .with_card(card(
            "Online Courses Roadmap",
            "Prioritized list of courses (Coursera, Udemy, Pluralsight, etc.) mapped to skills \
             gaps. Track completion status.",
            &[LEARNING],
        ))
        .with_card(card(
            "Books & Reading List",
            "Technical books, leadership books, and industry publications to read. Check off \
             as completed.",
            &[LEARNING],
        ))
        .with_card(card(
            "Certification Path",
            "Target certifications with study timelines, exam dates, and cost estimates.",
            &[LEARNING, HIGH_PRIORITY],
        ))
        .with_card(card(
            "Interview Prep Resources",
            "LeetCode patterns, system design resources, behavioral question bank, and \
             practice platforms.",
            &[LEARNING],
        ))
}

fn card(name: &str, description: &str, labels: &[&str]) -> CardTemplate {
    CardTemplate::new(name)
        .description(description)
        .labels(labels.iter().copied())
}
