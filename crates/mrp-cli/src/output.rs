//! Renders a [`RunSummary`] to stdout as a plain table or as JSON.

use mrp_core::RunSummary;

pub fn print_table(summary: &RunSummary) {
    println!("MRP run summary");
    println!("  run time:            {} ms", summary.run_time.as_millis());
    println!("  planned orders:      {}", summary.planned_order_count);
    println!("  total planned qty:   {}", summary.total_planned_quantity);
    println!();

    if summary.per_part.is_empty() {
        println!("(no part required netting)");
        return;
    }

    println!(
        "{:<20} {:>12} {:>12} {:>12} {:>12} {:>14} {:>12}",
        "part", "gross", "scheduled", "balance", "net", "1st plan qty", "1st plan date"
    );
    for row in &summary.per_part {
        println!(
            "{:<20} {:>12} {:>12} {:>12} {:>12} {:>14} {:>12}",
            row.part.as_str(),
            row.gross_requirements,
            row.scheduled_receipts,
            row.projected_balance,
            row.net_requirements,
            row.first_planned_quantity.map(|q| q.to_string()).unwrap_or_default(),
            row.first_planned_date.map(|d| d.to_string()).unwrap_or_default(),
        );
    }
}

pub fn print_json(summary: &RunSummary) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}
