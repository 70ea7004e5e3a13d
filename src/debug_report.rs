use headfinder::{HeadRule, HeadRuleTable, Selection, select_head};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_table(table: &HeadRuleTable, color: bool) {
    let palette = ansi::Palette::new(color);
    print_header(table, &palette);

    println!("\n{}", palette.paint("━━━ Categories ━━━", ansi::GRAY));
    let categories = table.categories();
    let width = categories.iter().map(|c| c.chars().count()).max().unwrap_or(0);
    for category in categories {
        for (idx, rule) in table.lookup(category).iter().enumerate() {
            let label = if idx == 0 { format!("{category:<width$}") } else { " ".repeat(width) };
            println!("  {}  {}", palette.paint(label, ansi::BLUE), fmt_rule(rule, &palette));
        }
    }
    println!();
}

pub fn print_category(table: &HeadRuleTable, category: &str, children: &[&str], color: bool) {
    let palette = ansi::Palette::new(color);
    print_header(table, &palette);

    println!("\n{}", palette.paint(format!("━━━ {category} ━━━"), ansi::GRAY));
    match table.rules_for(category) {
        Some(rules) => {
            for (idx, rule) in rules.iter().enumerate() {
                println!("  {} {}", palette.paint(format!("[{idx}]"), ansi::GRAY), fmt_rule(rule, &palette));
            }
        }
        None => println!("  {}", palette.dim("not registered, default rule applies")),
    }

    if children.is_empty() {
        println!();
        return;
    }

    println!("\n{}", palette.paint("━━━ Head ━━━", ansi::GRAY));
    let Some((head, selection)) = select_head(table, category, children) else {
        println!("{}", palette.dim("  No children"));
        return;
    };

    for (idx, child) in children.iter().enumerate() {
        if idx == head {
            println!(
                "  {} {}",
                palette.paint(format!("{idx:>2}"), ansi::YELLOW),
                palette.bold(palette.paint(*child, ansi::GREEN))
            );
        } else {
            println!("  {} {}", palette.dim(format!("{idx:>2}")), palette.dim(*child));
        }
    }
    println!(
        "\n  {} {}",
        palette.dim("selected by:"),
        palette.paint(fmt_selection(selection, table, category), ansi::CYAN)
    );
    println!();
}

fn print_header(table: &HeadRuleTable, palette: &ansi::Palette) {
    println!(
        "\n{}",
        palette.bold(
            palette.paint(format!("⚙  Head rules: {} ({} categories)", table.language(), table.len()), ansi::CYAN)
        )
    );
    println!("  {} {}", palette.dim("default:"), fmt_rule(table.default_rule(), palette));
}

fn fmt_rule(rule: &HeadRule, palette: &ansi::Palette) -> String {
    let text = rule.to_string();
    let (direction, candidates) = text.split_once(' ').unwrap_or((text.as_str(), ""));
    format!("{} {}", palette.paint(format!("{direction:<7}"), ansi::YELLOW), candidates)
}

fn fmt_selection(selection: Selection, table: &HeadRuleTable, category: &str) -> String {
    match selection {
        Selection::Unary => "only child".to_string(),
        Selection::Rule(idx) => {
            let rule = table.rules_for(category).and_then(|rules| rules.get(idx));
            match rule {
                Some(rule) => format!("rule [{idx}] {rule}"),
                None => format!("rule [{idx}]"),
            }
        }
        Selection::DefaultRule => format!("default rule {}", table.default_rule()),
        Selection::DefaultPosition => "default position".to_string(),
    }
}
