use entity_cli::output::{companies_table, render_resolution, stats_tables};
use entity_core::{AppConfig, EntityIdentity, ListQuery, RawCompany};

fn service() -> EntityIdentity {
    EntityIdentity::with_records(
        &AppConfig::default(),
        [
            RawCompany::new("Apple Inc.", "US").with_lei("HWUPKR0MPOU8FGXBT394"),
            RawCompany::new("Apple Hospitality REIT, Inc.", "US"),
            RawCompany::new("BHP Group Ltd", "AU"),
            RawCompany::new("Barclays PLC", "GB"),
        ],
    )
    .unwrap()
}

#[test]
fn companies_table_lists_every_record() {
    let svc = service();
    let records = svc.list_companies(&ListQuery::default());
    let rendered = companies_table(&records).to_string();
    for name in ["Apple Inc.", "BHP Group Ltd", "Barclays PLC"] {
        assert!(rendered.contains(name), "missing {name}");
    }
    assert!(rendered.contains("HWUPKR0MPOU8FGXBT394"));
}

#[test]
fn accepted_resolution_shows_final_record() {
    let svc = service();
    let result = svc.resolve_company("Apple Inc", Some("US"));
    let rendered = render_resolution(&result, 5);
    assert!(rendered.contains("Decision: accepted"));
    assert!(rendered.contains("Final: Apple Inc. (US)"));
    assert!(rendered.contains("Country hint: US"));
    assert!(rendered.contains("1.000"));
}

#[test]
fn rejected_resolution_has_no_final_record() {
    let svc = service();
    let result = svc.resolve_company("XYZABC123NOTREAL9999", None);
    let rendered = render_resolution(&result, 5);
    assert!(rendered.contains("Decision: rejected"));
    assert!(rendered.contains("Final: -"));
}

#[test]
fn top_limits_rendered_candidates() {
    let svc = service();
    let result = svc.resolve_company("Apple", Some("US"));
    assert!(result.matches.len() >= 2);
    let rendered = render_resolution(&result, 1);
    assert!(rendered.contains("more candidate(s)"));
}

#[test]
fn stats_tables_report_counts() {
    let svc = service();
    let (summary, countries) = stats_tables(&svc.stats());
    let summary = summary.to_string();
    assert!(summary.contains("Records"));
    assert!(summary.contains("With LEI"));
    let countries = countries.to_string();
    for code in ["AU", "GB", "US"] {
        assert!(countries.contains(code));
    }
}
