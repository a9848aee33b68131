use gaz_ancestry::{AncestryResolver, EmitFn, PlaceView, Recorder};
use gaz_place::{FeatureClass, Place, PlaceId};
use gaz_test_utils::{admin, city};
use pretty_assertions::assert_eq;

fn run_all(places: Vec<Place>) -> (Recorder, AncestryResolver) {
    let mut resolver = AncestryResolver::new();
    let mut out = Recorder::new();
    for place in places {
        resolver.ingest(place, &mut out).unwrap();
    }
    resolver.finalize(&mut out).unwrap();
    (out, resolver)
}

#[test]
fn test_cascade_resolves_reverse_order() {
    let mut resolver = AncestryResolver::new();
    let mut out = Recorder::new();

    resolver.ingest(admin(3, "US.CA.037"), &mut out).unwrap();
    resolver.ingest(admin(2, "US.CA"), &mut out).unwrap();
    assert!(out.emitted.is_empty());

    resolver.ingest(admin(1, "US"), &mut out).unwrap();

    assert_eq!(out.ids(), vec![PlaceId(1), PlaceId(2), PlaceId(3)]);
    let county = out.find(3).unwrap();
    assert_eq!(county.parent, Some(PlaceId(2)));
    assert_eq!(county.ancestors, vec![PlaceId(2), PlaceId(1)]);
    assert!(county.resolved);
    assert_eq!(resolver.waiting(), 0);
}

#[test]
fn test_cascade_reaches_leaves_below_new_divisions() {
    let mut resolver = AncestryResolver::new();
    let mut out = Recorder::new();

    resolver.ingest(city(10, "Pasadena", "US.CA.037"), &mut out).unwrap();
    resolver.ingest(city(11, "Sacramento", "US.CA"), &mut out).unwrap();
    resolver.ingest(admin(3, "US.CA.037"), &mut out).unwrap();
    resolver.ingest(admin(2, "US.CA"), &mut out).unwrap();
    resolver.ingest(admin(1, "US"), &mut out).unwrap();

    let mut ids = out.ids();
    ids.sort();
    assert_eq!(
        ids,
        vec![PlaceId(1), PlaceId(2), PlaceId(3), PlaceId(10), PlaceId(11)]
    );
    assert_eq!(out.find(10).unwrap().ancestors, vec![PlaceId(3), PlaceId(2), PlaceId(1)]);
    assert_eq!(out.find(11).unwrap().parent, Some(PlaceId(2)));
    // only divisions stay behind
    assert_eq!(resolver.tracked(), 3);
}

#[test]
fn test_finalize_falls_back_to_nearest_ancestor() {
    let (out, resolver) = run_all(vec![
        city(20, "Paris", "FR.75"),
        admin(1, "FR"),
        admin(30, "FR.11.75"),
        city(31, "Paris 01", "FR.11.75"),
    ]);

    let paris = out.find(20).unwrap();
    assert_eq!(paris.parent, Some(PlaceId(1)));
    assert!(paris.resolved);

    let department = out.find(30).unwrap();
    assert_eq!(department.parent, Some(PlaceId(1)));

    let arrondissement = out.find(31).unwrap();
    assert_eq!(arrondissement.ancestors, vec![PlaceId(30), PlaceId(1)]);

    assert_eq!(resolver.waiting(), 0);
    assert_eq!(resolver.stats().fallback, 2);
}

#[test]
fn test_unresolvable_key_is_force_emitted() {
    let (mut out, resolver) = run_all(vec![
        city(1, "Nowhere", "ZZ.01"),
        admin(2, "ZZ.01"),
        admin(3, "FR"),
    ]);

    assert_eq!(out.ids(), vec![PlaceId(3)]);
    // neither `ZZ` nor `ZZ.01` has a registered ancestor
    assert_eq!(resolver.stats().unresolvable_keys, 2);

    let report = resolver.report();
    assert_eq!(report.missing_keys, 2);
    assert_eq!(report.unresolved_places, 2);

    let forced = resolver.drain_remaining(&mut out).unwrap();
    assert_eq!(forced, 2);

    let nowhere = out.find(1).unwrap();
    assert!(!nowhere.resolved);
    assert_eq!(nowhere.parent, Some(PlaceId(2)));
    assert!(!out.find(2).unwrap().resolved);
}

#[test]
fn test_duplicate_admin_key_newest_registrant_wins() {
    let mut resolver = AncestryResolver::new();
    let mut out = Recorder::new();

    resolver.ingest(city(5, "Early", "US.CA"), &mut out).unwrap();
    resolver.ingest(admin(10, "US.CA"), &mut out).unwrap();
    resolver.ingest(admin(11, "US.CA"), &mut out).unwrap();
    resolver.ingest(admin(1, "US"), &mut out).unwrap();
    resolver.ingest(city(6, "Late", "US.CA"), &mut out).unwrap();

    let stats = resolver.stats();
    assert_eq!(stats.admin_conflicts, 1);
    assert!(stats.parent_errors >= 1);

    // parent links are set once: the early child keeps the first owner
    assert_eq!(out.find(5).unwrap().parent, Some(PlaceId(10)));
    assert_eq!(out.find(6).unwrap().parent, Some(PlaceId(11)));
    assert_eq!(out.emitted.len(), 5);
}

#[test]
fn test_duplicate_ids_are_emitted_separately() {
    let (out, _) = run_all(vec![
        admin(1, "DE"),
        city(7, "Berlin", "DE"),
        city(7, "Berlin", "DE"),
    ]);

    assert_eq!(out.ids(), vec![PlaceId(1), PlaceId(7), PlaceId(7)]);
}

#[test]
fn test_places_without_country_emit_immediately() {
    let mut resolver = AncestryResolver::new();
    let mut out = Recorder::new();
    let ocean = Place::builder(3_411_923, "Southern Ocean")
        .feature(FeatureClass::H, "OCN")
        .build();

    resolver.ingest(ocean, &mut out).unwrap();

    let emitted = out.find(3_411_923).unwrap();
    assert!(emitted.resolved);
    assert_eq!(emitted.parent, None);
    assert_eq!(resolver.tracked(), 0);
}

#[test]
fn test_division_with_blank_code_is_a_leaf() {
    let ghost = Place::builder(9, "Unnamed district")
        .feature(FeatureClass::A, "ADM2")
        .country("US")
        .admin_codes(["CA", ""])
        .build();
    assert!(ghost.ancestry_key().is_none());

    let (out, resolver) = run_all(vec![ghost, admin(2, "US.CA"), admin(1, "US")]);

    assert_eq!(out.find(9).unwrap().parent, Some(PlaceId(2)));
    assert_eq!(resolver.admin_divisions(), 2);
}

#[test]
fn test_emitter_error_propagates() {
    let mut resolver = AncestryResolver::new();
    let mut failing = EmitFn(|_: PlaceView<'_>| -> Result<(), &str> { Err("sink closed") });

    let err = resolver.ingest(admin(1, "US"), &mut failing).unwrap_err();
    assert_eq!(err, "sink closed");
}

#[test]
fn test_every_place_emitted_once() {
    let places = vec![
        city(100, "A", "IT.09.RM"),
        admin(4, "IT.09.RM"),
        city(101, "B", "IT.09"),
        admin(2, "ES.51"),
        city(102, "C", "ES.51.GI"),
        admin(3, "IT.09"),
        admin(1, "IT"),
        city(103, "D", "XX"),
    ];
    let total = places.len();
    let (mut out, resolver) = run_all(places);
    resolver.drain_remaining(&mut out).unwrap();

    let mut ids = out.ids();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), total);
    assert_eq!(out.emitted.len(), total);
}
