mod common;

use anyhow::Result;
use swapi_contract::suite::builtin::swapi_suite;
use swapi_contract::{NetworkErrorKind, Outcome, Suite, SuiteRunner};

#[tokio::test]
async fn builtin_suite_passes_against_stub() -> Result<()> {
    let stub = common::spawn_stub().await?;
    let runner = SuiteRunner::new(common::transport()?, 4);

    let report = runner.run(&swapi_suite()?, &stub.base_url).await?;

    let failures: Vec<String> = report.failures().map(|v| v.summary()).collect();
    assert!(failures.is_empty(), "unexpected failures: {:#?}", failures);
    assert_eq!(report.passed, 15);
    assert_eq!(report.base_url, stub.base_url.as_str());
    Ok(())
}

#[tokio::test]
async fn failures_are_collected_not_fatal() -> Result<()> {
    let stub = common::spawn_stub().await?;
    let suite = Suite::from_yaml_str(
        r#"
name: mixed
cases:
  - name: luke
    request: { path: /people/1 }
    expect: { status: 200, equals: { name: Luke Skywalker } }
  - name: wrong name
    request: { path: /people/1 }
    expect: { status: 200, equals: { name: Leia Organa } }
  - name: missing field
    request: { path: /planets/1 }
    expect: { status: 200, required: [climate, gravity] }
  - name: tatooine
    request: { path: /planets/1 }
    expect: { status: 200, types: { climate: string } }
"#,
    )?;

    let report = SuiteRunner::new(common::transport()?, 2)
        .run(&suite, &stub.base_url)
        .await?;

    assert_eq!((report.passed, report.failed, report.errored), (2, 2, 0));
    let failed: Vec<&str> = report.failures().map(|v| v.case.as_str()).collect();
    assert_eq!(failed, ["wrong name", "missing field"]);
    assert!(report.verdict("missing field").map(|v| v.summary()).unwrap_or_default().contains("'gravity'"));
    Ok(())
}

#[tokio::test]
async fn unreachable_host_reports_every_case_as_network_error() -> Result<()> {
    let base = common::refused_base_url()?;
    let suite = swapi_suite()?.filtered(Some("not found"));
    let cases = suite.cases.len();
    assert!(cases > 0);

    let report = SuiteRunner::new(common::transport()?, 8).run(&suite, &base).await?;

    assert_eq!(report.errored, cases);
    assert_eq!(report.failed, 0);
    assert!(report.verdicts.iter().all(|v| matches!(
        &v.outcome,
        Outcome::Error { error } if error.kind == NetworkErrorKind::Connect
    )));
    Ok(())
}

#[tokio::test]
async fn suite_file_round_trips_through_disk() -> Result<()> {
    let stub = common::spawn_stub().await?;
    let path = std::env::temp_dir().join(format!("swapi-contract-{}.json", std::process::id()));
    std::fs::write(
        &path,
        r#"{
  "name": "from-file",
  "cases": [
    {
      "name": "empty search",
      "request": { "path": "/starships/", "query": { "search": "nothing-here" } },
      "expect": { "status": 200, "equals": { "count": 0 }, "lengths": { "results": 0 } }
    }
  ]
}"#,
    )?;

    let suite = Suite::from_path(&path);
    let _ = std::fs::remove_file(&path);
    let suite = suite?;

    let report = SuiteRunner::new(common::transport()?, 1)
        .run(&suite, &stub.base_url)
        .await?;
    assert!(report.success(), "{}", report.summary_line());
    Ok(())
}
