use bethyw_rs::datasets::{catalogue, DatasetSource};
use bethyw_rs::{
    ColumnMapping, Error, Filters, MeasureFilter, RegionCollection, RegionFilter, SourceColumn,
    SourceFormat, YearRange,
};

const POPDEN: &str = r#"{
  "odata.metadata": "http://open.statswales.gov.wales/en-gb/dataset/$metadata",
  "value": [
    {"Localauthority_Code": "W06000011", "Localauthority_ItemName_ENG": "Swansea",
     "Measure_Code": "Pop", "Measure_ItemName_ENG": "Population", "Year_Code": "2014", "Data": 241297},
    {"Localauthority_Code": "W06000011", "Localauthority_ItemName_ENG": "Swansea",
     "Measure_Code": "Pop", "Measure_ItemName_ENG": "Population", "Year_Code": "2015", "Data": "242316"},
    {"Localauthority_Code": "W06000011", "Localauthority_ItemName_ENG": "Swansea",
     "Measure_Code": "Area", "Measure_ItemName_ENG": "Land area", "Year_Code": "2015", "Data": 379.7},
    {"Localauthority_Code": "W06000023", "Localauthority_ItemName_ENG": "Powys",
     "Measure_Code": "Pop", "Measure_ItemName_ENG": "Population", "Year_Code": "2015", "Data": 132447}
  ],
  "odata.nextLink": null
}"#;

fn dataset(code: &str) -> DatasetSource {
    catalogue().into_iter().find(|d| d.code == code).unwrap()
}

fn ingest(doc: &str, cols: &ColumnMapping, filters: &Filters) -> (RegionCollection, usize) {
    let mut regions = RegionCollection::new();
    let n = regions
        .populate(doc.as_bytes(), SourceFormat::WelshStatsJson, cols, filters)
        .unwrap();
    (regions, n)
}

#[test]
fn imports_rows_as_region_measure_year_values() {
    let (regions, n) = ingest(POPDEN, &dataset("popden").columns, &Filters::default());
    assert_eq!(n, 4);
    assert_eq!(regions.len(), 2);

    let swansea = regions.region("W06000011").unwrap();
    assert_eq!(swansea.name("eng").unwrap(), "Swansea");
    assert_eq!(swansea.len(), 2);
    let pop = swansea.measure("pop").unwrap();
    assert_eq!(pop.label(), "Population");
    assert_eq!(pop.value(2014).unwrap(), 241297.0);
    // Numeric strings parse too.
    assert_eq!(pop.value(2015).unwrap(), 242316.0);
}

#[test]
fn filters_must_all_hold() {
    let filters = Filters {
        regions: RegionFilter::new(["swan"]),
        measures: MeasureFilter::new(["POP"]),
        years: YearRange::year(2015),
    };
    let (regions, n) = ingest(POPDEN, &dataset("popden").columns, &filters);
    assert_eq!(n, 1);
    let swansea = regions.region("W06000011").unwrap();
    assert_eq!(swansea.len(), 1);
    assert_eq!(swansea.measure("pop").unwrap().len(), 1);
    assert!(!regions.contains("W06000023"));
}

#[test]
fn region_filter_matches_code_exactly() {
    let filters = Filters {
        regions: RegionFilter::new(["W06000023"]),
        ..Filters::default()
    };
    let (regions, n) = ingest(POPDEN, &dataset("popden").columns, &filters);
    assert_eq!(n, 1);
    assert!(regions.contains("W06000023"));
}

#[test]
fn welsh_name_is_used_for_matching_but_not_stored() {
    let doc = r#"{"value": [
        {"code": "W06000001", "eng": "Isle of Anglesey", "cym": "Ynys Môn",
         "year": 2020, "value": 1.5}
    ]}"#;
    let cols = ColumnMapping::new()
        .with(SourceColumn::AuthCode, "code")
        .with(SourceColumn::AuthNameEng, "eng")
        .with(SourceColumn::AuthNameCym, "cym")
        .with(SourceColumn::SingleMeasureCode, "rail")
        .with(SourceColumn::SingleMeasureName, "Rail passenger journeys")
        .with(SourceColumn::Year, "year")
        .with(SourceColumn::Value, "value");
    let filters = Filters {
        regions: RegionFilter::new(["ynys"]),
        ..Filters::default()
    };
    let (regions, n) = ingest(doc, &cols, &filters);
    assert_eq!(n, 1);

    let r = regions.region("W06000001").unwrap();
    assert_eq!(r.name("eng").unwrap(), "Isle of Anglesey");
    assert!(r.name("cym").is_err());
    assert_eq!(r.measure("rail").unwrap().value(2020).unwrap(), 1.5);
}

#[test]
fn single_measure_constants_come_from_mapping() {
    let doc = r#"{"value": [
        {"LocalAuthority_Code": "W06000015", "LocalAuthority_ItemName_ENG": "Cardiff",
         "Year_Code": "2018", "Data": 12900000}
    ]}"#;
    let (regions, _) = ingest(doc, &dataset("trains").columns, &Filters::default());
    let m = regions.region("W06000015").unwrap().measure("rail").unwrap();
    assert_eq!(m.label(), "Rail passenger journeys");
    assert_eq!(m.value(2018).unwrap(), 12_900_000.0);
}

#[test]
fn non_numeric_value_fails_but_keeps_earlier_rows() {
    let doc = r#"{"value": [
        {"code": "W1", "m": "pop", "l": "Population", "year": "2000", "value": 1},
        {"code": "W2", "m": "pop", "l": "Population", "year": "2000", "value": "n/a"}
    ]}"#;
    let cols = ColumnMapping::new()
        .with(SourceColumn::AuthCode, "code")
        .with(SourceColumn::MeasureCode, "m")
        .with(SourceColumn::MeasureName, "l")
        .with(SourceColumn::Year, "year")
        .with(SourceColumn::Value, "value");

    let mut regions = RegionCollection::new();
    let err = regions
        .populate(
            doc.as_bytes(),
            SourceFormat::WelshStatsJson,
            &cols,
            &Filters::default(),
        )
        .unwrap_err();
    assert!(matches!(err, Error::Parse { row: 2, .. }), "{err}");
    assert!(regions.contains("W1"));
    assert!(!regions.contains("W2"));
}

#[test]
fn missing_mapping_fails_before_reading_rows() {
    let cols = ColumnMapping::new()
        .with(SourceColumn::AuthCode, "Localauthority_Code")
        .with(SourceColumn::Year, "Year_Code")
        .with(SourceColumn::Value, "Data");
    let mut regions = RegionCollection::new();
    let err = regions
        .populate(
            POPDEN.as_bytes(),
            SourceFormat::WelshStatsJson,
            &cols,
            &Filters::default(),
        )
        .unwrap_err();
    assert!(matches!(err, Error::MissingColumn(SourceColumn::MeasureCode)));
    assert!(regions.is_empty());
}

#[test]
fn malformed_documents_are_rejected() {
    let cols = dataset("popden").columns;
    for doc in ["", "[1, 2]", r#"{"value": 3}"#, r#"{"value": [1]}"#] {
        let mut regions = RegionCollection::new();
        let res = regions.populate(
            doc.as_bytes(),
            SourceFormat::WelshStatsJson,
            &cols,
            &Filters::default(),
        );
        assert!(res.is_err(), "{doc:?} should fail");
    }
}
