use colored::*;
use console::Term;
use dialoguer::{ theme::ColorfulTheme, Input, Select };
use indicatif::{ ProgressBar, ProgressStyle };
use std::time::Duration;
use textwrap::wrap;

use autocodegen::{
    CodeLanguage,
    DashboardView,
    DiagramKind,
    DiagramViewer,
    RenderStatus,
    SimStatus,
    Visibility,
    WorkflowState,
    WorkflowStep,
};

/// Cells in the compliance score bar
const SCORE_BAR_WIDTH: usize = 40;
/// Distance moved by one pan command
const PAN_STEP: f64 = 40.0;

/// UI theme for consistent appearance
pub fn get_theme() -> ColorfulTheme {
    ColorfulTheme::default()
}

fn term_width() -> usize {
    (Term::stdout().size().1 as usize).max(40)
}

/// Print a section header
pub fn print_header(title: &str) {
    let title = format!(" {} ", title);
    println!("\n{}\n", title.bold().white().on_blue());
}

/// Print text with proper wrapping
pub fn print_text(text: &str) {
    let width = term_width();
    for line in text.lines() {
        if line.starts_with('#') {
            println!("{}", line.bold());
        } else if line.starts_with('-') || line.starts_with("```") {
            println!("{}", line);
        } else {
            for wrapped_line in wrap(line, width.saturating_sub(10)) {
                println!("{}", wrapped_line);
            }
        }
    }
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "ERROR:".red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "WARNING:".yellow().bold(), message);
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "SUCCESS:".green().bold(), message);
}

/// Print information
pub fn print_info(message: &str) {
    println!("{} {}", "INFO:".blue().bold(), message);
}

/// Print a formatted result
pub fn print_result(label: &str, value: &str) {
    println!("{}: {}", label.bold(), value);
}

/// Ask for the feature prompt
pub fn get_prompt() -> std::io::Result<String> {
    Input::with_theme(&get_theme())
        .with_prompt(
            "Describe your vehicle feature (e.g., Vision-based Lane Keep Assist with steer-by-wire)"
        )
        .allow_empty(true)
        .interact_text()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
}

/// Progress display for the five-stage pipeline indicator
pub struct PipelineProgress {
    bar: ProgressBar,
}

impl PipelineProgress {
    pub fn new() -> Self {
        let bar = ProgressBar::new(WorkflowStep::ALL.len() as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos:>2}/{len:2} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("##-")
        );
        bar.set_message("Processing...");
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    pub fn update(&self, state: &WorkflowState) {
        if state.is_generating {
            self.bar.set_position(state.current_step.index() as u64);
            self.bar.set_message(state.current_step.label());
        }
    }

    pub fn finish(&self, state: &WorkflowState) {
        if state.asset.is_some() {
            self.bar.set_position(WorkflowStep::ALL.len() as u64);
            self.bar.finish_with_message("Asset bundle ready");
        } else {
            self.bar.abandon_with_message("Synthesis failed");
        }
    }

    pub fn clear(&self) {
        self.bar.finish_and_clear();
    }
}

/// Print the pipeline checklist for a state
pub fn print_pipeline(state: &WorkflowState) {
    println!("{}", "DIGITAL TWIN PIPELINE".dimmed().bold());
    for step in WorkflowStep::ALL {
        if state.is_step_done(step) {
            println!("  {} {}", "✓".green(), step.label());
        } else if state.is_step_active(step) {
            println!("  {} {}", "›".blue(), step.label().white().bold());
        } else {
            println!("  {} {}", "·".dimmed(), step.label().dimmed());
        }
    }
    if let Some(elapsed) = state.elapsed() {
        println!("  {}", format!("finished in {:.1}s", elapsed.num_milliseconds() as f64 / 1000.0).dimmed());
    }
}

/// Format a score the way the dashboard labels it
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{:.0}%", score)
    } else {
        format!("{:.1}%", score)
    }
}

/// Render every panel of the dashboard
pub fn render_dashboard(view: &DashboardView) {
    let asset = view.asset();

    print_header("Safety Score");
    let filled = view.score_bar_cells(SCORE_BAR_WIDTH);
    println!(
        "{}{} {}",
        "█".repeat(filled).green(),
        "░".repeat(SCORE_BAR_WIDTH - filled).dimmed(),
        format_score(asset.compliance_score).green().bold()
    );
    if !asset.standards_compliance.is_empty() {
        let tags = asset.standards_compliance
            .iter()
            .map(|s| format!("[{}]", s))
            .collect::<Vec<_>>()
            .join(" ");
        println!("{}", tags.cyan());
    }

    print_header("System Design");
    print_text(&asset.system_design);

    print_diagram(view);

    print_header("CARLA Simulation Loop");
    let status = match asset.sim_data.status {
        SimStatus::Success => "SUCCESS".green().bold(),
        SimStatus::Failure => "FAILURE".red().bold(),
        SimStatus::Unknown => "UNKNOWN".yellow().bold(),
    };
    println!("STATUS: {}", status);
    for metric in &asset.sim_data.metrics {
        println!("  {:<28} {:>12.2}", metric.name.to_uppercase().dimmed(), metric.value);
    }

    print_source(view);

    print_header("Requirements");
    for requirement in &asset.requirements {
        print_list_item(&"✓".blue().to_string(), requirement);
    }

    print_header("Tests");
    for (i, test_case) in asset.test_cases.iter().enumerate() {
        print_list_item(&format!("{}.", i + 1).dimmed().to_string(), test_case);
    }
}

fn print_list_item(marker: &str, text: &str) {
    let width = term_width().saturating_sub(12);
    let mut lines = wrap(text, width).into_iter();
    if let Some(first) = lines.next() {
        println!("  {} {}", marker, first);
    }
    for line in lines {
        println!("     {}", line);
    }
}

fn tab_strip<T: PartialEq + Copy>(tabs: &[T], active: T, label: impl Fn(T) -> &'static str) -> String {
    tabs.iter()
        .map(|tab| {
            let text = format!(" {} ", label(*tab));
            if *tab == active {
                text.white().on_blue().bold().to_string()
            } else {
                text.dimmed().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Print the open code tab
pub fn print_source(view: &DashboardView) {
    print_header("Source Code");
    println!("{}\n", tab_strip(&CodeLanguage::ALL, view.active_code(), |l| l.label()));
    let source = view.source();
    if source.trim().is_empty() {
        println!("{}", "(no listing for this language)".dimmed());
    } else {
        println!("{}", source.bright_blue());
    }
}

/// Print the open diagram tab
pub fn print_diagram(view: &DashboardView) {
    print_header("Architecture Visualization");
    println!("{}\n", tab_strip(&DiagramKind::ALL, view.active_diagram(), |k| k.label()));
    print_viewer(view.viewer());
}

fn print_viewer(viewer: &DiagramViewer) {
    match viewer.status() {
        RenderStatus::Rendered(diagram) => {
            let viewport = viewer.viewport();
            let offset = viewport.offset();
            println!(
                "{}",
                format!(
                    "{} · {} · zoom {}% · offset ({:.0}, {:.0})",
                    diagram.render_id,
                    diagram.diagram_type,
                    viewport.zoom_percent(),
                    offset.x,
                    offset.y
                ).dimmed()
            );
            let indent = " ".repeat((offset.x / 10.0).max(0.0) as usize);
            let skip = (offset.y / 20.0).max(0.0) as usize;
            for line in diagram.lines.iter().skip(skip) {
                let text = match line.visibility {
                    Some(Visibility::Public) => line.text.green(),
                    Some(Visibility::Private) => line.text.red(),
                    Some(Visibility::Protected) => line.text.yellow(),
                    Some(Visibility::Package) => line.text.purple(),
                    None => line.text.normal(),
                };
                println!("{}{}", indent, text);
            }
        }
        RenderStatus::Failed { message, cause } => {
            println!("{}", "UML Render Error".red().bold());
            println!("{}", message.red());
            println!("{}", format!("({})", cause).dimmed());
            println!("{}", "Choose 'Regenerate diagram' to try again.".dimmed());
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BrowseAction {
    Code(CodeLanguage),
    Diagram(DiagramKind),
    ZoomIn,
    ZoomOut,
    PanLeft,
    PanRight,
    PanUp,
    PanDown,
    ResetView,
    Retry,
    Quit,
}

impl BrowseAction {
    fn label(&self) -> String {
        match self {
            BrowseAction::Code(lang) => format!("Code: {}", lang.label()),
            BrowseAction::Diagram(kind) => format!("Diagram: {}", kind.label()),
            BrowseAction::ZoomIn => "Zoom in".to_string(),
            BrowseAction::ZoomOut => "Zoom out".to_string(),
            BrowseAction::PanLeft => "Pan left".to_string(),
            BrowseAction::PanRight => "Pan right".to_string(),
            BrowseAction::PanUp => "Pan up".to_string(),
            BrowseAction::PanDown => "Pan down".to_string(),
            BrowseAction::ResetView => "Reset view".to_string(),
            BrowseAction::Retry => "Regenerate diagram".to_string(),
            BrowseAction::Quit => "Quit".to_string(),
        }
    }
}

/// Interactive tab browser over a dashboard
pub fn browse_dashboard(view: &mut DashboardView) -> std::io::Result<()> {
    let mut actions: Vec<BrowseAction> = CodeLanguage::ALL.iter().map(|l| BrowseAction::Code(*l)).collect();
    actions.extend(DiagramKind::ALL.iter().map(|k| BrowseAction::Diagram(*k)));
    actions.extend([
        BrowseAction::ZoomIn,
        BrowseAction::ZoomOut,
        BrowseAction::PanLeft,
        BrowseAction::PanRight,
        BrowseAction::PanUp,
        BrowseAction::PanDown,
        BrowseAction::ResetView,
        BrowseAction::Retry,
        BrowseAction::Quit,
    ]);
    let labels: Vec<String> = actions.iter().map(|a| a.label()).collect();

    loop {
        let selection = Select::with_theme(&get_theme())
            .with_prompt("Dashboard")
            .items(&labels)
            .default(0)
            .interact()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

        match actions[selection] {
            BrowseAction::Code(lang) => {
                view.select_code(lang);
                print_source(view);
                continue;
            }
            BrowseAction::Diagram(kind) => view.select_diagram(kind),
            BrowseAction::ZoomIn => view.viewer_mut().zoom_in(),
            BrowseAction::ZoomOut => view.viewer_mut().zoom_out(),
            BrowseAction::PanLeft => view.viewer_mut().pan_by(-PAN_STEP, 0.0),
            BrowseAction::PanRight => view.viewer_mut().pan_by(PAN_STEP, 0.0),
            BrowseAction::PanUp => view.viewer_mut().pan_by(0.0, -PAN_STEP),
            BrowseAction::PanDown => view.viewer_mut().pan_by(0.0, PAN_STEP),
            BrowseAction::ResetView => view.viewer_mut().reset_view(),
            BrowseAction::Retry => view.retry_diagram(),
            BrowseAction::Quit => return Ok(()),
        }
        print_diagram(view);
    }
}
