use std::collections::BTreeMap;

use proptest::prelude::*;
use pulse_core::{DatedEvent, Instant, Track, merge_chronological, merge_interleaved, normalize_timestamp};

const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

/// Date expressions from every branch of the cascade, plus junk and gaps.
fn arb_date() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        (2019i32..2022, 1u32..=12, 1u32..=28)
            .prop_map(|(y, m, d)| Some(format!("{y:04}-{m:02}-{d:02}"))),
        (
            prop::sample::select(vec!["Early ", "Mid ", "Late ", "Circa ", "~", ""]),
            prop::sample::select(MONTHS.to_vec()),
            2019i32..2022,
        )
            .prop_map(|(q, m, y)| Some(format!("{q}{m} {y}"))),
        (
            prop::sample::select(vec!["Spring", "Summer", "Fall", "Autumn", "Winter"]),
            2019i32..2022,
        )
            .prop_map(|(s, y)| Some(format!("{s} {y}"))),
        (2019i32..2022).prop_map(|y| Some(y.to_string())),
        Just(None),
        "[a-z ~]{0,10}".prop_map(Some),
    ]
}

/// Events whose labels record their source position.
fn arb_track() -> impl Strategy<Value = Vec<DatedEvent>> {
    prop::collection::vec(arb_date(), 0..16).prop_map(|dates| {
        dates
            .into_iter()
            .enumerate()
            .map(|(i, date)| DatedEvent {
                date,
                label: i.to_string(),
                content: String::new(),
                embed: None,
            })
            .collect()
    })
}

/// Source indices of `events` after a stable sort by instant.
fn stable_order(events: &[DatedEvent]) -> Vec<String> {
    let mut keyed: Vec<(Instant, &DatedEvent)> = events.iter().map(|e| (e.instant(), e)).collect();
    keyed.sort_by_key(|(instant, _)| *instant);
    keyed.into_iter().map(|(_, e)| e.label.clone()).collect()
}

fn count_by_instant(events: &[DatedEvent]) -> BTreeMap<Instant, usize> {
    let mut counts = BTreeMap::new();
    for e in events {
        *counts.entry(e.instant()).or_insert(0) += 1;
    }
    counts
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn normalization_is_deterministic(date in arb_date()) {
        prop_assert_eq!(normalize_timestamp(date.as_deref()), normalize_timestamp(date.as_deref()));
    }

    #[test]
    fn rows_are_monotonic(clinical in arb_track(), personal in arb_track()) {
        let rows = merge_chronological(&clinical, &personal);
        for pair in rows.windows(2) {
            prop_assert!(pair[0].instant() <= pair[1].instant());
        }
    }

    #[test]
    fn every_event_lands_once_on_its_side(clinical in arb_track(), personal in arb_track()) {
        let rows = merge_chronological(&clinical, &personal);
        let paired = rows.iter().filter(|r| r.is_paired()).count();
        prop_assert_eq!(rows.len(), clinical.len() + personal.len() - paired);

        let clinical_out: Vec<String> = rows
            .iter()
            .filter_map(|r| r.clinical())
            .map(|n| {
                assert_eq!(n.track, Track::Clinical);
                n.event.label.clone()
            })
            .collect();
        let personal_out: Vec<String> = rows
            .iter()
            .filter_map(|r| r.personal())
            .map(|n| {
                assert_eq!(n.track, Track::Personal);
                n.event.label.clone()
            })
            .collect();

        // same events, in stable instant order
        prop_assert_eq!(clinical_out, stable_order(&clinical));
        prop_assert_eq!(personal_out, stable_order(&personal));
    }

    #[test]
    fn pairs_only_on_equal_instants(clinical in arb_track(), personal in arb_track()) {
        let rows = merge_chronological(&clinical, &personal);
        let mut paired_at: BTreeMap<Instant, usize> = BTreeMap::new();
        for row in &rows {
            if let (Some(c), Some(p)) = (row.clinical(), row.personal()) {
                prop_assert_eq!(c.instant, p.instant);
                *paired_at.entry(c.instant).or_insert(0) += 1;
            }
        }

        // as many pairs at each instant as the thinner track allows
        let c_counts = count_by_instant(&clinical);
        let p_counts = count_by_instant(&personal);
        for (instant, c_n) in &c_counts {
            let expected = (*c_n).min(p_counts.get(instant).copied().unwrap_or(0));
            prop_assert_eq!(paired_at.get(instant).copied().unwrap_or(0), expected);
        }
    }

    #[test]
    fn interleaved_is_sorted_and_complete(clinical in arb_track(), personal in arb_track()) {
        let nodes = merge_interleaved(&clinical, &personal);
        prop_assert_eq!(nodes.len(), clinical.len() + personal.len());
        for pair in nodes.windows(2) {
            prop_assert!(pair[0].instant <= pair[1].instant);
            if pair[0].instant == pair[1].instant {
                // clinical never follows personal inside a tie
                prop_assert!(!(pair[0].track == Track::Personal && pair[1].track == Track::Clinical));
            }
        }
    }
}
