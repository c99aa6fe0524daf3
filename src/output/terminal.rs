//! Terminal output formatting with box drawing characters.

use crate::model::{CloudSummary, QuantitySummary, SimulationKind};

/// Width of the output box (interior content width)
const BOX_WIDTH: usize = 61;

/// Print a double-line header.
pub fn print_header(title: &str) {
    println!();
    println!("{}", "═".repeat(BOX_WIDTH + 2));
    println!("  {}", title);
    println!("{}", "═".repeat(BOX_WIDTH + 2));
}

/// Print a double-line footer.
pub fn print_footer() {
    println!("{}", "═".repeat(BOX_WIDTH + 2));
    println!();
}

/// Print one boxed distribution block.
fn print_quantity_box(title: &str, unit: &str, q: &QuantitySummary) {
    println!("  ┌{}┐", "─".repeat(BOX_WIDTH));
    let header = format!("{} ({})", title, unit);
    println!("  │  {:<width$}│", header, width = BOX_WIDTH - 2);

    let mean = format!("mean {:>12.4e}    σ {:>12.4e}", q.mean, q.std_dev);
    println!("  │  {:<width$}│", mean, width = BOX_WIDTH - 2);

    let pct = format!(
        "p5 {:>11.4e}   p50 {:>11.4e}   p95 {:>11.4e}",
        q.percentile_5, q.percentile_50, q.percentile_95
    );
    println!("  │  {:<width$}│", pct, width = BOX_WIDTH - 2);

    let range = format!("min {:>12.4e}   max {:>12.4e}", q.min, q.max);
    println!("  │  {:<width$}│", range, width = BOX_WIDTH - 2);
    println!("  └{}┘", "─".repeat(BOX_WIDTH));
}

/// Print the complete breakup summary.
pub fn print_breakup(kind: SimulationKind, summary: &CloudSummary) {
    print_header(&format!("breakup — {} complete", kind));

    println!();
    println!("  Fragments:   {}", summary.fragment_count);
    println!(
        "  Cloud mass:  {:.3} kg of {:.3} kg input",
        summary.total_mass_kg, summary.input_mass_kg
    );
    if let Some(catastrophic) = summary.catastrophic {
        let label = if catastrophic {
            "catastrophic"
        } else {
            "non-catastrophic"
        };
        println!("  Regime:      {}", label);
    }
    println!();

    print_quantity_box(
        "Characteristic length",
        "m",
        &summary.characteristic_length_m,
    );
    print_quantity_box("Area-to-mass ratio", "m²/kg", &summary.area_to_mass_m2_per_kg);
    print_quantity_box("Ejection speed", "km/s", &summary.ejection_speed_kmps);

    println!();
    print_footer();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_width_is_reasonable() {
        // Box should be wide enough for typical content
        assert!(BOX_WIDTH >= 50);
        assert!(BOX_WIDTH <= 80);
    }
}
