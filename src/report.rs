use crate::fips_tests::FipsTest;
use crate::suite::VerdictMatrix;

fn mark(passed: bool) -> &'static str {
    if passed {
        "PASS ✓"
    } else {
        "FAIL ✗"
    }
}

/// One line per test listing every key's verdict in key order.
pub fn format_columns(matrix: &VerdictMatrix) -> String {
    let mut out = String::new();
    for test in FipsTest::ALL {
        let column: Vec<&str> = matrix
            .column(test)
            .into_iter()
            .map(|passed| if passed { "pass" } else { "fail" })
            .collect();
        out.push_str(&format!(
            "{:10} test result: [{}]\n",
            test.name(),
            column.join(", ")
        ));
    }
    out
}

/// Full text report: summary, per-key table, then the failing details.
pub fn format_report(matrix: &VerdictMatrix) -> String {
    let failed = matrix.failed_keys();
    let mut summary = format!(
        "FIPS 140 Key Screening\n\
         ======================\n\
         Profile: {}\n\
         Keys Screened: {}\n\
         Keys Passing: {}/{}\n\n",
        matrix.profile.name(),
        matrix.len(),
        matrix.len() - failed.len(),
        matrix.len()
    );

    summary.push_str(&format!("{:>5}", "Key"));
    for test in FipsTest::ALL {
        summary.push_str(&format!("  {:>9}", test.name()));
    }
    summary.push('\n');

    for row in &matrix.rows {
        summary.push_str(&format!("{:>5}", row.key));
        for verdict in &row.verdicts {
            summary.push_str(&format!("  {:>9}", mark(verdict.passed)));
        }
        summary.push('\n');
    }

    if !failed.is_empty() {
        summary.push_str("\nFailures:\n---------\n");
        for row in matrix.rows.iter().filter(|row| !row.all_passed()) {
            for verdict in row.verdicts.iter().filter(|v| !v.passed) {
                summary.push_str(&format!(
                    "key {:>3} {:10} {}\n",
                    row.key,
                    verdict.test.name(),
                    verdict.detail
                ));
            }
        }
    }

    summary.push('\n');
    summary.push_str(&format_columns(matrix));
    summary
}
