//! Plan command handler.

use anyhow::Result;
use colored::Colorize;

use crate::cli::output::{
    md_list, output_json, print_header, print_kv, print_list, print_section, print_table,
    OutputMode,
};
use crate::init::AppContext;
use crate::models::ProjectPlan;
use crate::services::PlanBrief;

pub async fn handle_plan(
    ctx: &AppContext,
    description: &str,
    requirements: &[String],
    constraints: &[String],
    tech_stack: &[String],
    mode: OutputMode,
) -> Result<()> {
    let brief = PlanBrief {
        description,
        requirements,
        constraints,
        tech_stack,
    };
    let plan = ctx.planner.create_plan(&brief).await?;

    match mode {
        OutputMode::Json => output_json(&plan),
        OutputMode::Markdown => println!("{}", plan_markdown(&plan)),
        OutputMode::Human => print_plan(&plan),
    }
    Ok(())
}

fn print_plan(plan: &ProjectPlan) {
    print_header(&plan.project_name);
    println!("{}", plan.overview);
    if let Some(duration) = &plan.estimated_duration {
        print_kv("Estimated duration", duration);
    }

    for (i, phase) in plan.phases.iter().enumerate() {
        print_section(
            &format!("Phase {}: {}", i + 1, phase.name),
            &phase.description,
        );
        let rows = phase
            .tasks
            .iter()
            .map(|t| {
                vec![
                    t.id.clone(),
                    t.title.clone(),
                    t.priority.as_str().to_string(),
                    t.estimated_effort.clone().unwrap_or_default(),
                    t.dependencies.join(", "),
                ]
            })
            .collect();
        print_table(&["ID", "Task", "Priority", "Effort", "Depends on"], rows);
        if let Some(milestone) = &phase.milestone {
            println!("  {} {}", "Milestone:".green(), milestone);
        }
    }

    print_list("Key risks", &plan.key_risks);
    print_list("Technical requirements", &plan.tech_requirements);
}

pub fn plan_markdown(plan: &ProjectPlan) -> String {
    let mut out = format!("# {}\n\n{}\n", plan.project_name, plan.overview);
    if let Some(duration) = &plan.estimated_duration {
        out.push_str(&format!("\n**Estimated duration:** {}\n", duration));
    }
    for (i, phase) in plan.phases.iter().enumerate() {
        out.push_str(&format!(
            "\n## Phase {}: {}\n\n{}\n\n",
            i + 1,
            phase.name,
            phase.description
        ));
        for task in &phase.tasks {
            out.push_str(&format!(
                "- **{}** {} ({})",
                task.id,
                task.title,
                task.priority.as_str()
            ));
            if let Some(effort) = &task.estimated_effort {
                out.push_str(&format!(", {}", effort));
            }
            out.push('\n');
        }
        if let Some(milestone) = &phase.milestone {
            out.push_str(&format!("\n**Milestone:** {}\n", milestone));
        }
    }
    if !plan.key_risks.is_empty() {
        out.push_str(&format!("\n## Key risks\n\n{}\n", md_list(&plan.key_risks)));
    }
    if !plan.tech_requirements.is_empty() {
        out.push_str(&format!(
            "\n## Technical requirements\n\n{}\n",
            md_list(&plan.tech_requirements)
        ));
    }
    out
}
