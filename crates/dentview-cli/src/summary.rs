use std::path::Path;

use console::Style;
use dentview_core::detection::{summarize_labels, Detection};
use dentview_core::render::PassSummary;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    finding: Style,
    disabled: Style,
    path: Style,
    error: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            finding: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
            error: Style::new().red().bold(),
        }
    }
}

fn print_title(s: &Styles, title: &str) {
    println!();
    println!("  {}", s.title.apply_to(title));
    println!(
        "  {}",
        s.title.apply_to("\u{2550}".repeat(title.chars().count()))
    );
    println!();
}

pub fn print_render_summary(
    source: &str,
    output: &Path,
    summary: Option<&PassSummary>,
    detections: &[Detection],
) {
    let s = Styles::new();
    print_title(&s, "Dentview Render");

    println!("  {:<14}{}", s.label.apply_to("Source"), s.path.apply_to(source));
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(output.display())
    );

    match summary {
        Some(summary) => {
            let t = &summary.transform;
            println!(
                "  {:<14}{}",
                s.label.apply_to("Scale"),
                s.value.apply_to(format!("{:.4}", t.scale))
            );
            println!(
                "  {:<14}{}",
                s.label.apply_to("Offset"),
                s.value.apply_to(format!("{:.1}, {:.1}", t.offset_x, t.offset_y))
            );
            if summary.degenerate > 0 {
                println!(
                    "  {:<14}{}",
                    s.label.apply_to("Degenerate"),
                    s.disabled.apply_to(format!("{} zero-area boxes", summary.degenerate))
                );
            }
        }
        None => println!(
            "  {:<14}{}",
            s.label.apply_to("Pass"),
            s.disabled.apply_to("skipped, surface left blank")
        ),
    }
    println!();

    print_findings(&s, detections);
}

fn print_findings(s: &Styles, detections: &[Detection]) {
    if detections.is_empty() {
        println!(
            "  {:<14}{}",
            s.header.apply_to("Findings"),
            s.disabled.apply_to("none")
        );
        println!();
        return;
    }

    println!("  {}", s.header.apply_to("Findings"));
    for (label, count) in summarize_labels(detections) {
        println!(
            "    {:<20}{}",
            s.finding.apply_to(label),
            s.value.apply_to(count)
        );
    }
    println!();
    for d in detections {
        println!("    {}", s.label.apply_to(d.label_text()));
    }
    println!();
}

pub fn print_batch_summary(rendered: usize, skipped: usize, failures: &[(String, String)]) {
    let s = Styles::new();
    print_title(&s, "Batch");

    println!(
        "  {:<14}{}",
        s.label.apply_to("Rendered"),
        s.value.apply_to(rendered)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Skipped"),
        s.value.apply_to(skipped)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Failed"),
        s.value.apply_to(failures.len())
    );
    for (name, message) in failures {
        println!("    {} {}", s.error.apply_to(name), s.label.apply_to(message));
    }
    println!();
}

pub fn print_report(report: &str) {
    let s = Styles::new();
    println!("  {}", s.header.apply_to("Report"));
    for line in report.lines() {
        println!("    {line}");
    }
    println!();
}
