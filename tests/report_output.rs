use bethyw_rs::report::{to_json, to_text};
use bethyw_rs::{Measure, Region, RegionCollection};

fn swansea() -> Region {
    let mut r = Region::new("W06000011");
    r.set_name("eng", "Swansea").unwrap();
    r.set_name("cym", "Abertawe").unwrap();
    let mut pop = Measure::new("pop", "Population");
    pop.set_value(1992, 150.0);
    pop.set_value(1991, 100.0);
    r.set_measure(pop);
    r
}

#[test]
fn empty_collection_exports_empty_object() {
    assert_eq!(to_json(&RegionCollection::new()).unwrap(), "{}");
    assert_eq!(to_text(&RegionCollection::new()), "");
}

#[test]
fn json_export_shape() {
    let mut regions = RegionCollection::new();
    regions.upsert(swansea());
    regions.upsert(Region::new("W06000023"));

    let v: serde_json::Value = serde_json::from_str(&to_json(&regions).unwrap()).unwrap();
    assert_eq!(v["W06000011"]["names"]["eng"], "Swansea");
    assert_eq!(v["W06000011"]["names"]["cym"], "Abertawe");
    assert_eq!(v["W06000011"]["measures"]["pop"]["1991"], 100.0);
    assert_eq!(v["W06000011"]["measures"]["pop"]["1992"], 150.0);
    assert_eq!(v["W06000023"]["names"], serde_json::json!({}));
    assert_eq!(v["W06000023"]["measures"], serde_json::json!({}));
}

#[test]
fn text_report_layout() {
    let mut regions = RegionCollection::new();
    regions.upsert(swansea());

    let expected = "\
Swansea / Abertawe (W06000011)
Population (pop)
      1991       1992    Average     Diff.   % Diff.
100.000000 150.000000 125.000000 50.000000 50.000000
";
    assert_eq!(to_text(&regions), expected);
}

#[test]
fn text_report_orders_regions_and_marks_missing_data() {
    let mut regions = RegionCollection::new();
    let mut unnamed = Region::new("W2");
    unnamed.set_measure(Measure::new("dens", "Population density"));
    regions.upsert(unnamed);
    let mut named = Region::new("W1");
    named.set_name("eng", "Powys").unwrap();
    regions.upsert(named);

    let expected = "\
Powys (W1)
<no measures>

Unnamed (W2)
Population density (dens)
<no data>
";
    assert_eq!(to_text(&regions), expected);
}
