//! Arctic Chronicle Headless Validation Harness
//!
//! Validates the pure expedition logic and the bundled dataset without
//! a terminal client. Runs entirely in-process — no input, no rendering.
//!
//! Usage:
//!   cargo run -p chronicle-simtest
//!   cargo run -p chronicle-simtest -- --verbose

use chronicle_logic::advisor::{self, FALLBACK_RESPONSE};
use chronicle_logic::climate::{self, YearRecord, RECORDS};
use chronicle_logic::metric::{derive_metric, derive_series, ice_decline_percent, series_max};
use chronicle_logic::mission::{self, MissionAttempt};
use chronicle_logic::role::Role;
use chronicle_logic::session::{CharacterDraft, MissionStep, Screen, Session};

// ── Dataset manifest (same JSON the client ships) ───────────────────────
const MANIFEST_JSON: &str = include_str!("../../../data/climate_records.json");

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    println!("=== Arctic Chronicle Validation Harness ===\n");

    let mut results = Vec::new();

    // 1. Dataset manifest vs built-in table
    results.extend(validate_dataset(verbose));

    // 2. Metric & series derivation sweep
    results.extend(validate_metrics(verbose));

    // 3. Mission grading & tolerance boundaries
    results.extend(validate_grading(verbose));

    // 4. Advisor rule table
    results.extend(validate_advisor(verbose));

    // 5. Scripted end-to-end session
    results.extend(validate_session_flow(verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

// ── 1. Dataset ──────────────────────────────────────────────────────────

fn validate_dataset(verbose: bool) -> Vec<TestResult> {
    println!("--- Dataset ---");
    let mut results = Vec::new();

    let manifest: Vec<YearRecord> = match serde_json::from_str(MANIFEST_JSON) {
        Ok(m) => m,
        Err(e) => {
            results.push(TestResult {
                name: "manifest_parse".into(),
                passed: false,
                detail: format!("JSON parse error: {}", e),
            });
            return results;
        }
    };

    results.push(TestResult {
        name: "manifest_matches_builtin".into(),
        passed: manifest == RECORDS,
        detail: format!("{} manifest records vs {} built-in", manifest.len(), RECORDS.len()),
    });

    let chronological = RECORDS.windows(2).all(|p| p[0].year < p[1].year);
    results.push(TestResult {
        name: "dataset_chronological".into(),
        passed: chronological,
        detail: "years strictly increasing".into(),
    });

    let fallback = climate::record_for_year(1234);
    results.push(TestResult {
        name: "dataset_fallback_year".into(),
        passed: fallback.year == climate::DEFAULT_YEAR,
        detail: format!("unknown year falls back to {}", fallback.year),
    });

    let ice_loss = ice_decline_percent(climate::record_for_year(2050));
    results.push(TestResult {
        name: "dataset_ice_declines".into(),
        passed: ice_loss > 0.0,
        detail: format!("2050 ice down {:.1}% from 1925", ice_loss),
    });

    if verbose {
        println!("  Records:");
        for r in &RECORDS {
            println!(
                "    {}: ice {:.1} | temp {:+.1} | bears {} | energy {:.1} | people {:.1}M",
                r.year,
                r.ice_area_mkm2,
                r.temp_anomaly_c,
                r.bear_population,
                r.energy_twh,
                r.population_millions
            );
        }
    }

    results
}

// ── 2. Metrics & Series ─────────────────────────────────────────────────

fn validate_metrics(verbose: bool) -> Vec<TestResult> {
    println!("--- Metrics & Series ---");
    let mut results = Vec::new();

    // Every role × year combination yields a complete metric.
    let mut all_complete = true;
    for record in &RECORDS {
        for role in Role::ALL {
            let m = derive_metric(Some(role), record);
            if m.label.is_empty() || m.value.is_empty() || m.trend.is_empty() {
                all_complete = false;
            }
        }
    }
    results.push(TestResult {
        name: "metric_all_combos".into(),
        passed: all_complete,
        detail: format!("{} role × year combinations complete", RECORDS.len() * Role::ALL.len()),
    });

    // Spot values from the dataset.
    let engineer_2025 = derive_metric(Some(Role::Engineer), climate::record_for_year(2025));
    results.push(TestResult {
        name: "metric_engineer_2025".into(),
        passed: engineer_2025.value == "12.4 ТВт·ч",
        detail: format!("energy metric reads {}", engineer_2025.value),
    });

    let default_metric = derive_metric(None, climate::record_for_year(2025));
    results.push(TestResult {
        name: "metric_default_is_ice".into(),
        passed: default_metric.label == "Площадь льда",
        detail: format!("no role → {}", default_metric.label),
    });

    // Series length is invariant over role.
    let mut lengths_ok = derive_series(None, &RECORDS).len() == RECORDS.len();
    for role in Role::ALL {
        if derive_series(Some(role), &RECORDS).len() != RECORDS.len() {
            lengths_ok = false;
        }
    }
    results.push(TestResult {
        name: "series_length_invariant".into(),
        passed: lengths_ok,
        detail: format!("all series have {} points", RECORDS.len()),
    });

    // Temperature series is display-shifted above zero.
    let temp_series = derive_series(Some(Role::Climatologist), &RECORDS);
    results.push(TestResult {
        name: "series_temp_positive".into(),
        passed: temp_series.iter().all(|v| *v > 0.0),
        detail: "anomaly +2 offset keeps bars positive".into(),
    });

    if verbose {
        for role in Role::ALL {
            let series = derive_series(Some(role), &RECORDS);
            println!(
                "  {:13} series max {:.1}: {:?}",
                role.info().title,
                series_max(&series),
                series.iter().map(|v| (v * 10.0).round() / 10.0).collect::<Vec<_>>()
            );
        }
    }

    results
}

// ── 3. Grading ──────────────────────────────────────────────────────────

fn attempt(a1: &str, a2: &str) -> MissionAttempt {
    MissionAttempt {
        answer1: a1.to_string(),
        answer2: a2.to_string(),
    }
}

fn validate_grading(_verbose: bool) -> Vec<TestResult> {
    println!("--- Mission Grading ---");
    let mut results = Vec::new();

    // Every role has a two-task spec against the 2000/2025 records.
    let mut specs_ok = true;
    for role in Role::ALL {
        let spec = mission::spec_for(role);
        if spec.title.is_empty() || spec.tasks.len() != 2 {
            specs_ok = false;
        }
    }
    results.push(TestResult {
        name: "grading_specs_complete".into(),
        passed: specs_ok,
        detail: "4 roles × 2 tasks".into(),
    });

    // Exact answers pass for every role.
    let mut exact_pass = true;
    for role in Role::ALL {
        let spec = mission::spec_for(role);
        let out = mission::grade(
            Some(role),
            &attempt(&spec.tasks[0].expected.to_string(), &spec.tasks[1].expected.to_string()),
        );
        if !out.correct {
            exact_pass = false;
        }
    }
    results.push(TestResult {
        name: "grading_exact_answers_pass".into(),
        passed: exact_pass,
        detail: "expected values grade correct for all roles".into(),
    });

    // Coarse boundary: 23000 ± 100 fails, ± 99.9 passes.
    let at_boundary = mission::grade(Some(Role::Biologist), &attempt("23100", "22000"));
    let inside = mission::grade(Some(Role::Biologist), &attempt("23099.9", "22000"));
    results.push(TestResult {
        name: "grading_coarse_boundary_strict".into(),
        passed: !at_boundary.correct && inside.correct,
        detail: "diff 100 fails, 99.9 passes".into(),
    });

    // Fine boundary: 10.2 ± 0.5 fails, ± 0.49 passes.
    let at_fine = mission::grade(Some(Role::Engineer), &attempt("10.7", "12.4"));
    let inside_fine = mission::grade(Some(Role::Engineer), &attempt("10.69", "12.4"));
    results.push(TestResult {
        name: "grading_fine_boundary_strict".into(),
        passed: !at_fine.correct && inside_fine.correct,
        detail: "diff 0.5 fails, 0.49 passes".into(),
    });

    // Malformed input is a retry, never a panic.
    let mut malformed_ok = true;
    for bad in ["", "  ", "abc", "1,5", "NaN", "inf", "12abc"] {
        let out = mission::grade(Some(Role::Climatologist), &attempt(bad, "1.1"));
        if out.correct {
            malformed_ok = false;
        }
    }
    results.push(TestResult {
        name: "grading_malformed_rejected".into(),
        passed: malformed_ok,
        detail: "7 malformed inputs rejected".into(),
    });

    // No role is a soft failure.
    let no_role = mission::grade(None, &attempt("1", "2"));
    results.push(TestResult {
        name: "grading_missing_role".into(),
        passed: !no_role.correct && no_role.message == "Миссия не найдена",
        detail: "no persona → mission not found".into(),
    });

    // Change and rate derivation.
    let bio = mission::grade(Some(Role::Biologist), &attempt("23000", "22000"));
    let rate_ok = bio
        .rate_per_year
        .map(|r| (r - 40.0).abs() < 1e-9)
        .unwrap_or(false);
    let change_ok = bio
        .change
        .map(|c| (c - -1000.0).abs() < 1e-9)
        .unwrap_or(false);
    results.push(TestResult {
        name: "grading_change_and_rate".into(),
        passed: bio.correct && rate_ok && change_ok,
        detail: "-1000 over 25 years → 40/year".into(),
    });

    // Idempotence.
    let a = attempt("0.4", "1.1");
    let first = mission::grade(Some(Role::Climatologist), &a);
    let second = mission::grade(Some(Role::Climatologist), &a);
    results.push(TestResult {
        name: "grading_idempotent".into(),
        passed: first == second,
        detail: "same attempt grades identically".into(),
    });

    results
}

// ── 4. Advisor ──────────────────────────────────────────────────────────

fn validate_advisor(verbose: bool) -> Vec<TestResult> {
    println!("--- Advisor ---");
    let mut results = Vec::new();

    let probes = [
        ("Почему тают льды?", "Морской лёд"),
        ("Что с медведями?", "Популяция белых медведей"),
        ("Как меняется климат?", "Температура в Арктике"),
        ("Откуда берётся энергия?", "Энергопотребление"),
        ("Сколько людей там живёт?", "Население Арктики"),
    ];
    let mut rules_ok = true;
    for (question, prefix) in probes {
        if !advisor::respond(question).starts_with(prefix) {
            rules_ok = false;
        }
        if verbose {
            println!("  {:40} → {:.40}…", question, advisor::respond(question));
        }
    }
    results.push(TestResult {
        name: "advisor_rules_match".into(),
        passed: rules_ok,
        detail: format!("{} topic probes answered", probes.len()),
    });

    results.push(TestResult {
        name: "advisor_fallback".into(),
        passed: advisor::respond("xyz completely unrelated") == FALLBACK_RESPONSE,
        detail: "unknown topic → fallback suggestion".into(),
    });

    // Declaration order beats later rules.
    let mixed = advisor::respond("таяние льда и климат");
    results.push(TestResult {
        name: "advisor_first_match_wins".into(),
        passed: mixed.starts_with("Морской лёд"),
        detail: "ice rule outranks climate rule".into(),
    });

    results.push(TestResult {
        name: "advisor_seed_greetings".into(),
        passed: advisor::seed_messages().len() == 2,
        detail: "fresh chat starts with 2 advisor lines".into(),
    });

    results
}

// ── 5. Session Flow ─────────────────────────────────────────────────────

fn validate_session_flow(_verbose: bool) -> Vec<TestResult> {
    println!("--- Session Flow ---");
    let mut results = Vec::new();

    let mut session = Session::new();

    // Creation is gated on name + role.
    let bad = session.create_character(&CharacterDraft::default());
    results.push(TestResult {
        name: "session_draft_validation".into(),
        passed: bad.is_err(),
        detail: format!("empty draft → {} errors", bad.err().map_or(0, |e| e.len())),
    });

    let draft = CharacterDraft {
        name: "Мира".into(),
        role: Some(Role::Biologist),
        ..CharacterDraft::default()
    };
    let created = session.create_character(&draft).is_ok();
    results.push(TestResult {
        name: "session_character_created".into(),
        passed: created && session.screen == Screen::Map,
        detail: "valid draft lands on the map".into(),
    });

    // Year selection sticks to the dataset.
    let rejected = !session.select_year(1999);
    let accepted = session.select_year(2000);
    results.push(TestResult {
        name: "session_year_selection".into(),
        passed: rejected && accepted && session.selected_year == 2000,
        detail: "1999 rejected, 2000 accepted".into(),
    });

    // Full mission loop: fail, retry, pass.
    session.goto(Screen::Missions);
    session.begin_mission();
    session.set_answers("1", "2");
    session.check_answers();
    let failed_does_not_count = !session.complete_mission() && session.completed_missions == 0;
    session.retry_mission();
    session.set_answers("23000", "22000");
    session.check_answers();
    let passed_counts = session.complete_mission() && session.completed_missions == 1;
    results.push(TestResult {
        name: "session_mission_loop".into(),
        passed: failed_does_not_count && passed_counts,
        detail: "failure retries, success increments".into(),
    });

    // Chat exchange appends exactly two lines.
    let before = session.chat.len();
    session.ask_advisor("Почему тают льды?");
    results.push(TestResult {
        name: "session_chat_exchange".into(),
        passed: session.chat.len() == before + 2,
        detail: "one question → two transcript lines".into(),
    });

    // Profile aggregates.
    let stats = session.profile_stats();
    results.push(TestResult {
        name: "session_profile_stats".into(),
        passed: stats.completed_missions == 1
            && stats.questions_asked == 1
            && stats.badges_earned == 1,
        detail: format!(
            "missions={} questions={} badges={}",
            stats.completed_missions, stats.questions_asked, stats.badges_earned
        ),
    });

    // Reset wipes progress.
    session.reset();
    results.push(TestResult {
        name: "session_reset".into(),
        passed: session.character.is_none()
            && session.completed_missions == 0
            && session.mission_step == MissionStep::Intro
            && session.chat.len() == 2,
        detail: "back to persona creation with a fresh chat".into(),
    });

    results
}
