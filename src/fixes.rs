//! The invoice page fixes, in the order they must run.

use crate::error::PatchResult;
use crate::patch::{PatchSet, Transformation};

pub const RESULTS_DIV_LINE: &str = r#"const resultsDiv = document.getElementById("results");"#;
pub const CURRENT_INVOICES_DECL: &str = "\n    let currentInvoices = [];";

pub const NOTES_GRID_SPAN_DIV: &str = r#"<div style="grid-column: 1 / -1;">"#;
pub const PLAIN_DIV: &str = "<div>";

pub const DISPLAY_RESULTS_HEAD: &str =
    "async function displayResults(searchData) {\n      const { invoices, deals } = searchData;";
pub const CURRENT_INVOICES_ASSIGN: &str = "\n      currentInvoices = invoices || [];";

pub const SAVE_GUARD_PATTERN: &str = r"if \(invoices && invoices\.length > 0\) \{";
pub const SAVE_GUARD_REPLACEMENT: &str = "if (currentInvoices && currentInvoices.length > 0) {";

pub const SAVE_LOOP_PATTERN: &str = r"invoices\.forEach\(inv =>";
pub const SAVE_LOOP_REPLACEMENT: &str = "currentInvoices.forEach(inv =>";

/// Build the five page fixes.
pub fn invoice_page_fixes() -> PatchResult<PatchSet> {
    Ok(PatchSet::new(vec![
        Transformation::insert_after(
            "declare currentInvoices",
            RESULTS_DIV_LINE,
            CURRENT_INVOICES_DECL,
        ),
        Transformation::literal("unspan inspection notes", NOTES_GRID_SPAN_DIV, PLAIN_DIV),
        Transformation::insert_after(
            "track displayed invoices",
            DISPLAY_RESULTS_HEAD,
            CURRENT_INVOICES_ASSIGN,
        ),
        Transformation::pattern(
            "save guard uses currentInvoices",
            SAVE_GUARD_PATTERN,
            SAVE_GUARD_REPLACEMENT,
        )?,
        Transformation::pattern(
            "save loop uses currentInvoices",
            SAVE_LOOP_PATTERN,
            SAVE_LOOP_REPLACEMENT,
        )?,
    ]))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const SAMPLE_PAGE: &str = r#"<html>
<body>
  <div class="grid">
    <div style="grid-column: 1 / -1;">
      <label>Inspection Notes</label>
    </div>
  </div>
  <script>
    const resultsDiv = document.getElementById("results");

    async function displayResults(searchData) {
      const { invoices, deals } = searchData;
      render(invoices, deals);
    }

    async function saveLines() {
      if (invoices && invoices.length > 0) {
        invoices.forEach(inv => save(inv));
      }
    }
  </script>
</body>
</html>
"#;

    #[test]
    fn test_fix_order() {
        let fixes = invoice_page_fixes().unwrap();
        let names: Vec<_> = fixes.iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            vec![
                "declare currentInvoices",
                "unspan inspection notes",
                "track displayed invoices",
                "save guard uses currentInvoices",
                "save loop uses currentInvoices",
            ]
        );
    }

    #[test]
    fn test_sample_page_is_fully_patched() {
        let outcome = invoice_page_fixes().unwrap().apply(SAMPLE_PAGE);
        let page = &outcome.content;

        assert!(page.contains(
            "const resultsDiv = document.getElementById(\"results\");\n    let currentInvoices = [];"
        ));
        assert!(page.contains("    <div>\n      <label>Inspection Notes</label>"));
        assert!(page.contains(
            "const { invoices, deals } = searchData;\n      currentInvoices = invoices || [];\n      render(invoices, deals);"
        ));
        assert!(page.contains("if (currentInvoices && currentInvoices.length > 0) {"));
        assert!(page.contains("currentInvoices.forEach(inv => save(inv));"));

        assert!(!page.contains(NOTES_GRID_SPAN_DIV));
        assert!(!page.contains("if (invoices && invoices.length > 0) {"));
        assert!(!page.contains(" invoices.forEach(inv =>"));
        assert!(outcome.steps.iter().all(|s| s.matches == 1));
    }

    #[test]
    fn test_second_pass_changes_nothing() {
        let fixes = invoice_page_fixes().unwrap();
        let once = fixes.apply(SAMPLE_PAGE);
        let twice = fixes.apply(&once.content);

        assert_eq!(twice.content, once.content);
        assert_eq!(twice.total_matches(), 0);
    }

    #[test]
    fn test_unrelated_content_is_byte_identical() {
        let page = "<html>\n  <p>no invoices here</p>\r\n</html>";
        let outcome = invoice_page_fixes().unwrap().apply(page);
        assert_eq!(outcome.content, page);
        assert_eq!(outcome.total_matches(), 0);
    }

    #[test]
    fn test_declaration_elsewhere_does_not_block_either_insertion() {
        let page = format!(
            "let currentInvoices = [];\n{RESULTS_DIV_LINE}\n{DISPLAY_RESULTS_HEAD}\n}}"
        );
        let outcome = invoice_page_fixes().unwrap().apply(&page);

        assert_eq!(outcome.steps[0].matches, 1);
        assert_eq!(outcome.steps[2].matches, 1);
        assert!(outcome
            .content
            .contains(&format!("{RESULTS_DIV_LINE}{CURRENT_INVOICES_DECL}")));
        assert!(outcome
            .content
            .contains(&format!("{DISPLAY_RESULTS_HEAD}{CURRENT_INVOICES_ASSIGN}")));
    }

    #[test]
    fn test_save_handler_rewrites_every_occurrence() {
        let page = "\
if (invoices && invoices.length > 0) {
  invoices.forEach(inv => a(inv));
}
if (invoices && invoices.length > 0) {
  invoices.forEach(inv => b(inv));
}";
        let outcome = invoice_page_fixes().unwrap().apply(page);

        assert_eq!(outcome.steps[3].matches, 2);
        assert_eq!(outcome.steps[4].matches, 2);
        assert_eq!(
            outcome.content.matches(SAVE_GUARD_REPLACEMENT).count(),
            2
        );
        assert_eq!(
            outcome.content.matches(SAVE_LOOP_REPLACEMENT).count(),
            2
        );
    }
}
