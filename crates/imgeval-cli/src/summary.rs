use console::Style;
use imgeval_core::diff::{DiffClass, DiffLegend};
use imgeval_core::model::{TemplateDetail, TemplateRecord};
use imgeval_core::scores::SavedResults;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

fn underline(s: &Styles, len: usize) {
    println!("  {}", s.title.apply_to("\u{2550}".repeat(len)));
}

pub fn print_catalog(rows: &[&TemplateRecord], page: usize, pages: usize, total: usize) {
    let s = Styles::new();

    println!();
    println!(
        "  {}",
        s.title
            .apply_to(format!("Templates (page {page}/{pages}, {total} total)"))
    );
    underline(&s, 32);

    if rows.is_empty() {
        println!("  {}", s.disabled.apply_to("No templates found"));
        return;
    }

    for record in rows {
        println!();
        let name = if record.template_name.is_empty() {
            record.template_id.as_str()
        } else {
            record.template_name.as_str()
        };
        println!(
            "  {} {}",
            s.value.apply_to(name),
            s.label.apply_to(format!("[{}]", record.template_id))
        );
        println!(
            "    {:<12}{}",
            s.label.apply_to("Author"),
            s.method.apply_to(record.author())
        );
        println!(
            "    {:<12}{} .. {}",
            s.label.apply_to("Dates"),
            record.start_label(),
            record.end_label()
        );
        if !record.description.is_empty() {
            println!(
                "    {:<12}{}",
                s.label.apply_to("About"),
                record.description
            );
        }
    }
    println!();
}

pub fn print_detail(template_id: &str, detail: &TemplateDetail, duplicates: &[String]) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to(format!("Template {template_id}")));
    underline(&s, 16);
    println!();

    println!("  {}", s.header.apply_to("Score axes"));
    if detail.axes.is_empty() {
        println!("    {}", s.disabled.apply_to("none"));
    }
    for axis in &detail.axes {
        println!(
            "    {:<16}{} {}",
            s.label.apply_to(&axis.id),
            s.value.apply_to(&axis.label),
            s.method
                .apply_to(format!("[{}, {}]", -axis.half(), axis.half()))
        );
    }
    println!();

    println!(
        "  {}",
        s.header
            .apply_to(format!("Image pairs ({})", detail.image_pairs.len()))
    );
    for (i, pair) in detail.image_pairs.iter().enumerate() {
        let marker = if duplicates.contains(&pair.a) {
            s.disabled.apply_to(" (duplicate A)").to_string()
        } else {
            String::new()
        };
        println!(
            "    {:>4}  {}  {}{}",
            i + 1,
            s.path.apply_to(&pair.a),
            s.path.apply_to(&pair.b),
            marker
        );
    }
    println!();
}

pub fn print_legend(legend: &DiffLegend) {
    let s = Styles::new();
    let total = legend.total().max(1) as f64;

    println!("  {}", s.header.apply_to("Diff legend"));
    for class in DiffClass::ALL {
        let count = legend.count(class);
        println!(
            "    {:<18}{:>10}  {}",
            s.label.apply_to(class.to_string()),
            s.value.apply_to(count),
            s.method
                .apply_to(format!("{:.1}%", count as f64 / total * 100.0))
        );
    }
}

pub fn print_scores(template_id: &str, user_id: &str, results: Option<&SavedResults>) {
    let s = Styles::new();

    println!();
    println!(
        "  {}",
        s.title
            .apply_to(format!("Scores for {template_id} by {user_id}"))
    );
    underline(&s, 24);

    let Some(results) = results.filter(|r| !r.is_empty()) else {
        println!("  {}", s.disabled.apply_to("No saved scores"));
        println!();
        return;
    };

    for (filename, axes) in results {
        println!();
        println!("  {}", s.path.apply_to(filename));
        for (axis, value) in axes {
            println!(
                "    {:<16}{}",
                s.label.apply_to(axis),
                s.value.apply_to(format!("{value:+}"))
            );
        }
    }
    println!();
}
