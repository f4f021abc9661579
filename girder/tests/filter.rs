use girder::filter::SearchFilter;

#[derive(Debug, Clone, PartialEq)]
struct Investor {
    name: String,
    country: String,
}

fn investor(name: &str, country: &str) -> Investor {
    Investor {
        name: name.to_string(),
        country: country.to_string(),
    }
}

fn sample() -> Vec<Investor> {
    vec![
        investor("Alder Partners", "Norway"),
        investor("Birch Capital", "Sweden"),
        investor("Aldergrove Trust", "Norway"),
        investor("Cedar Holdings", "Denmark"),
    ]
}

fn fields(r: &Investor) -> Vec<String> {
    vec![r.name.clone(), r.country.clone()]
}

#[test]
fn test_empty_term_is_identity() {
    let records = sample();
    let filter = SearchFilter::new();
    let hits = filter.apply(&records, fields);
    assert_eq!(hits.len(), records.len());
    assert_eq!(hits[0], &records[0]);
    assert_eq!(hits[3], &records[3]);
}

#[test]
fn test_case_insensitive_substring() {
    let records = sample();
    let filter = SearchFilter::with_term("ALDER");
    let hits = filter.apply(&records, fields);
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].name, "Alder Partners");
    assert_eq!(hits[1].name, "Aldergrove Trust");
}

#[test]
fn test_any_field_matches() {
    let records = sample();
    let filter = SearchFilter::with_term("sweden");
    let hits = filter.apply(&records, fields);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Birch Capital");
}

#[test]
fn test_no_match_yields_empty() {
    let records = sample();
    let filter = SearchFilter::with_term("zzz");
    assert!(filter.apply(&records, fields).is_empty());
}

#[test]
fn test_longer_term_narrows() {
    // A term extended from a prefix can only shrink the result set.
    let records = sample();
    let prefixes = ["a", "al", "ald", "alde", "alderg"];
    let mut previous: Option<Vec<String>> = None;
    for term in prefixes {
        let hits: Vec<String> = SearchFilter::with_term(term)
            .apply(&records, fields)
            .into_iter()
            .map(|r| r.name.clone())
            .collect();
        if let Some(prev) = &previous {
            assert!(
                hits.iter().all(|h| prev.contains(h)),
                "{term:?} matched records its prefix did not"
            );
        }
        previous = Some(hits);
    }
}

#[test]
fn test_filtering_is_pure() {
    let records = sample();
    let filter = SearchFilter::with_term("norway");
    let first = filter.apply(&records, fields).len();
    let second = filter.apply(&records, fields).len();
    assert_eq!(first, second);
    assert_eq!(records.len(), 4);
}
