//! The sample sales table the visualisation agent works on.

pub const SALES_COLUMNS: [&str; 6] = ["Date", "Product", "Category", "Units_Sold", "Revenue", "Region"];

const SALES_ROWS: [[&str; 6]; 20] = [
    ["2024-10-01", "Laptop", "Electronics", "15", "22500", "North"],
    ["2024-10-01", "Mouse", "Electronics", "45", "1350", "North"],
    ["2024-10-01", "Desk", "Furniture", "8", "3200", "South"],
    ["2024-10-02", "Laptop", "Electronics", "12", "18000", "South"],
    ["2024-10-02", "Chair", "Furniture", "20", "6000", "North"],
    ["2024-10-02", "Keyboard", "Electronics", "30", "2400", "East"],
    ["2024-10-03", "Laptop", "Electronics", "18", "27000", "East"],
    ["2024-10-03", "Monitor", "Electronics", "25", "12500", "West"],
    ["2024-10-03", "Desk", "Furniture", "10", "4000", "North"],
    ["2024-10-04", "Chair", "Furniture", "15", "4500", "South"],
    ["2024-10-04", "Mouse", "Electronics", "60", "1800", "East"],
    ["2024-10-04", "Keyboard", "Electronics", "40", "3200", "West"],
    ["2024-10-05", "Laptop", "Electronics", "20", "30000", "West"],
    ["2024-10-05", "Monitor", "Electronics", "30", "15000", "North"],
    ["2024-10-05", "Desk", "Furniture", "12", "4800", "East"],
    ["2024-10-06", "Chair", "Furniture", "25", "7500", "West"],
    ["2024-10-06", "Mouse", "Electronics", "50", "1500", "South"],
    ["2024-10-06", "Keyboard", "Electronics", "35", "2800", "North"],
    ["2024-10-07", "Laptop", "Electronics", "22", "33000", "North"],
    ["2024-10-07", "Monitor", "Electronics", "28", "14000", "East"],
];

/// Header plus 20 rows, newline terminated.
pub fn sample_sales_csv() -> String {
    std::iter::once(SALES_COLUMNS.join(","))
        .chain(SALES_ROWS.iter().map(|row| row.join(",")))
        .map(|line| line + "\n")
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_shape() {
        let csv = sample_sales_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 21);
        assert_eq!(lines[0], "Date,Product,Category,Units_Sold,Revenue,Region");
        assert_eq!(lines[20], "2024-10-07,Monitor,Electronics,28,14000,East");
        assert!(lines.iter().all(|l| l.split(',').count() == 6));
    }

    #[test]
    fn revenue_total() {
        let total: u64 = sample_sales_csv()
            .lines()
            .skip(1)
            .filter_map(|l| l.split(',').nth(4))
            .map(|r| r.parse::<u64>().unwrap())
            .sum();
        assert_eq!(total, 215_050);
    }
}
