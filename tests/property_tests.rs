// Property tests over randomly generated snippets

use dsatty::parser::{detect, extract, DsaKind, Language};
use dsatty::playback::{PlaybackController, PlaybackState, TickOutcome};
use dsatty::simulator::simulate;
use proptest::prelude::*;
use std::time::{Duration, Instant};

/// One line of a Java stack snippet
fn stack_line() -> impl Strategy<Value = String> {
    prop_oneof![
        (-1000i64..1000).prop_map(|n| format!("s.push({});", n)),
        Just("s.pop();".to_string()),
        Just("// comment".to_string()),
        Just(String::new()),
    ]
}

fn stack_snippet() -> impl Strategy<Value = String> {
    prop::collection::vec(stack_line(), 0..40).prop_map(|lines| lines.join("\n"))
}

/// Lines mixing call shapes from every grammar with arbitrary text
fn mixed_snippet() -> impl Strategy<Value = String> {
    let line = prop_oneof![
        stack_line(),
        Just("q.offer(1);".to_string()),
        Just("m.put(\"a\", 2);".to_string()),
        Just("arr.splice(1, 0, 9);".to_string()),
        Just("heapq.heappush(h, 4)".to_string()),
        Just("v.insert(v.begin() + 1, 7);".to_string()),
        Just("list.addFirst(3);".to_string()),
        "\\PC{0,40}",
    ];
    prop::collection::vec(line, 0..30).prop_map(|lines| lines.join("\n"))
}

fn loaded(source: &str) -> PlaybackController {
    let operations = extract(source, Language::Java, DsaKind::Stack).unwrap();
    let mut playback = PlaybackController::new(Duration::from_millis(100));
    playback.load(simulate(DsaKind::Stack, &operations));
    playback
}

proptest! {
    #[test]
    fn detection_never_panics(source in "\\PC{0,200}") {
        let kind = detect(&source);
        prop_assert!(DsaKind::ALL.contains(&kind));
    }

    #[test]
    fn extraction_is_total(source in "\\PC{0,200}") {
        for language in Language::ALL {
            for kind in DsaKind::ALL {
                if let Ok(operations) = extract(&source, language, kind) {
                    let line_count = source.lines().count();
                    for op in &operations {
                        prop_assert!(op.source_line >= 1 && op.source_line <= line_count);
                        prop_assert!(kind.allows(op.kind));
                    }
                    prop_assert_eq!(simulate(kind, &operations).len(), operations.len());
                }
            }
        }
    }

    #[test]
    fn extraction_is_deterministic(source in mixed_snippet()) {
        for language in Language::ALL {
            for kind in DsaKind::ALL {
                let first = extract(&source, language, kind);
                let second = extract(&source, language, kind);
                match (first, second) {
                    (Ok(a), Ok(b)) => {
                        prop_assert_eq!(a, b);
                    }
                    (Err(a), Err(b)) => {
                        prop_assert_eq!(a.to_string(), b.to_string());
                    }
                    _ => {
                        prop_assert!(false, "extract disagreed with itself");
                    }
                }
            }
        }
    }

    #[test]
    fn simulation_is_deterministic(source in stack_snippet()) {
        let operations = extract(&source, Language::Java, DsaKind::Stack).unwrap();
        let first = simulate(DsaKind::Stack, &operations);
        let second = simulate(DsaKind::Stack, &operations);
        for (a, b) in first.iter().zip(second.iter()) {
            prop_assert_eq!(&a.model, &b.model);
            prop_assert_eq!(&a.effect, &b.effect);
            prop_assert_eq!(a.source_line, b.source_line);
        }
    }

    #[test]
    fn stack_size_follows_push_pop(source in stack_snippet()) {
        let operations = extract(&source, Language::Java, DsaKind::Stack).unwrap();
        let timeline = simulate(DsaKind::Stack, &operations);

        let mut expected = 0usize;
        for (op, snapshot) in operations.iter().zip(timeline.iter()) {
            if op.operands.is_empty() {
                expected = expected.saturating_sub(1);
            } else {
                expected += 1;
            }
            prop_assert_eq!(snapshot.model.len(), expected);
        }
    }

    #[test]
    fn seek_is_idempotent(source in stack_snippet(), index in 0usize..64) {
        let mut playback = loaded(&source);
        playback.seek(index);
        let (cursor, state) = (playback.cursor(), playback.state());
        playback.seek(index);
        prop_assert_eq!(playback.cursor(), cursor);
        prop_assert_eq!(playback.state(), state);
        if !playback.timeline().is_empty() {
            prop_assert_eq!(state, PlaybackState::Paused);
            prop_assert!(cursor < playback.timeline().len());
        }
    }

    #[test]
    fn autoplay_terminates(source in stack_snippet(), speed in 0.25f64..2.0) {
        let mut playback = loaded(&source);
        playback.set_speed(speed).unwrap();
        let total = playback.timeline().len();

        let mut fired = 0;
        if playback.play(Instant::now()) {
            while let Some(tick) = playback.pending_tick() {
                match playback.fire(tick, tick.due()) {
                    TickOutcome::Advanced(_) | TickOutcome::ReachedEnd(_) => fired += 1,
                    other => prop_assert!(false, "unexpected outcome {:?}", other),
                }
                prop_assert!(fired < total);
            }
            prop_assert_eq!(playback.state(), PlaybackState::AtEnd);
            prop_assert_eq!(playback.cursor(), total - 1);
        } else {
            prop_assert!(total <= 1);
        }
    }

    #[test]
    fn earlier_snapshots_are_isolated(source in stack_snippet()) {
        let operations = extract(&source, Language::Java, DsaKind::Stack).unwrap();
        let full = simulate(DsaKind::Stack, &operations);
        for n in 0..operations.len() {
            let prefix = simulate(DsaKind::Stack, &operations[..n + 1]);
            prop_assert_eq!(&prefix.get(n).unwrap().model, &full.get(n).unwrap().model);
        }
    }
}
