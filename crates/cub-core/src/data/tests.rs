//! Tests for data module

use super::*;

use approx::assert_abs_diff_eq;

fn sample_df() -> DataFrame {
    DataFrame::from_columns(vec![
        ("a", Column::int(vec![1, 2, 3])),
        ("b", Column::float(vec![4.0, 5.0, 6.0])),
        ("c", Column::text(["x", "y", "z"])),
    ])
    .unwrap()
}

fn float_at(df: &DataFrame, name: &str, idx: usize) -> f64 {
    df.column(name).unwrap().get(idx).unwrap().as_f64().unwrap()
}

// ==================== Construction ====================

#[test]
fn test_dataframe_creation() {
    let df = sample_df();

    assert_eq!(df.shape(), (3, 3));
    assert_eq!(df.len(), df.shape().0);
    assert_eq!(df.columns().len(), df.shape().1);
    assert_eq!(df.columns(), vec!["a", "b", "c"]);
    assert_eq!(df.column("a").unwrap().kind(), ColumnKind::Int);
    assert_eq!(df.column("c").unwrap().dtype(), "string");
}

#[test]
fn test_builder_pattern() {
    let df = DataFrameBuilder::new()
        .with_column("x", vec![1.0, 2.0])
        .unwrap()
        .with_column("y", vec![true, false])
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(df.shape(), (2, 2));
    assert_eq!(df.column("y").unwrap(), &Column::bool(vec![true, false]));
}

#[test]
fn test_construction_errors() {
    let err = DataFrame::from_columns(vec![
        ("a", Column::int(vec![1, 2])),
        ("a", Column::int(vec![3, 4])),
    ])
    .unwrap_err();
    assert!(matches!(err, DataError::DuplicateColumn(ref name) if name == "a"));
    assert_eq!(err.kind(), ErrorKind::Value);

    let err = DataFrame::from_columns(vec![
        ("a", Column::int(vec![1, 2])),
        ("b", Column::int(vec![3])),
    ])
    .unwrap_err();
    assert!(matches!(err, DataError::DimensionMismatch { .. }));

    let err = DataFrame::from_columns(vec![("", Column::int(vec![1]))]).unwrap_err();
    assert!(matches!(err, DataError::EmptyColumnName));

    let matrix = ndarray::ArrayD::<f64>::zeros(ndarray::IxDyn(&[2, 2]));
    let err = Column::try_from(matrix).unwrap_err();
    assert!(matches!(err, DataError::NotOneDimensional(2)));
    assert_eq!(err.kind(), ErrorKind::Type);
}

#[test]
fn test_empty_dataframe() {
    let df = DataFrame::new();
    assert_eq!(df.shape(), (0, 0));
    assert!(df.is_empty());
    assert_eq!(df.mean().unwrap().ncols(), 0);
}

// ==================== Selection ====================

#[test]
fn test_single_column_roundtrip() {
    let df = DataFrame::from_columns(vec![
        ("a", Column::int(vec![1, 2, 3])),
        ("b", Column::int(vec![4, 5, 6])),
    ])
    .unwrap();

    let a = df.get("a").unwrap();
    let expected = DataFrame::from_columns(vec![("a", Column::int(vec![1, 2, 3]))]).unwrap();
    assert_eq!(a, expected);

    let rewrapped =
        DataFrame::from_columns(vec![("a", a.column("a").unwrap().clone())]).unwrap();
    assert_eq!(rewrapped.column("a"), df.column("a"));
}

#[test]
fn test_select_columns() {
    let df = sample_df();

    let selected = df.get(vec!["c", "a"]).unwrap();
    assert_eq!(selected.columns(), vec!["c", "a"]);
    assert_eq!(selected.len(), 3);

    assert!(matches!(
        df.get("missing"),
        Err(DataError::ColumnNotFound(ref name)) if name == "missing"
    ));
    assert!(matches!(
        df.get(vec!["a", "a"]),
        Err(DataError::DuplicateColumn(_))
    ));
}

#[test]
fn test_mask_selection() {
    let df = sample_df();

    let mask = df.get("a").unwrap().gt(1).unwrap();
    assert_eq!(mask.column("a").unwrap(), &Column::bool(vec![false, true, true]));

    let filtered = df.get(&mask).unwrap();
    assert_eq!(filtered.shape(), (2, 3));
    assert_eq!(filtered.column("a").unwrap(), &Column::int(vec![2, 3]));
    assert_eq!(filtered.column("c").unwrap(), &Column::text(["y", "z"]));
    assert_eq!(filtered, df.filter(&mask).unwrap());
}

#[test]
fn test_mask_errors() {
    let df = sample_df();

    let wide = df.get(vec!["a", "b"]).unwrap().gt(0).unwrap();
    assert!(matches!(
        df.filter(&wide),
        Err(DataError::DimensionMismatch { .. })
    ));

    let not_bool = df.get("a").unwrap();
    let err = df.filter(&not_bool).unwrap_err();
    assert!(matches!(err, DataError::TypeMismatch { .. }));
    assert_eq!(err.kind(), ErrorKind::Type);

    let short = DataFrame::from_columns(vec![("m", Column::bool(vec![true]))]).unwrap();
    assert!(matches!(
        df.filter(&short),
        Err(DataError::DimensionMismatch { .. })
    ));
}

#[test]
fn test_cells_selection() {
    let df = sample_df();

    let cells = df
        .get((
            RowSelector::from(Slice::new(Some(1), None)),
            ColSelector::from(vec!["c", "a"]),
        ))
        .unwrap();
    assert_eq!(cells.columns(), vec!["c", "a"]);
    assert_eq!(cells.column("a").unwrap(), &Column::int(vec![2, 3]));

    let last = df
        .get((RowSelector::Index(-1), ColSelector::Slice(Slice::full())))
        .unwrap();
    assert_eq!(last.shape(), (1, 3));
    assert_eq!(last.column("b").unwrap(), &Column::float(vec![6.0]));

    let reversed = df
        .get((
            RowSelector::Slice(Slice::full().with_step(-1)),
            ColSelector::Index(0),
        ))
        .unwrap();
    assert_eq!(reversed.column("a").unwrap(), &Column::int(vec![3, 2, 1]));

    let mask = df.get("b").unwrap().lt(5.5).unwrap();
    let masked = df
        .get((RowSelector::Mask(&mask), ColSelector::Positions(vec![0, -1])))
        .unwrap();
    assert_eq!(masked.columns(), vec!["a", "c"]);
    assert_eq!(masked.len(), 2);

    assert!(matches!(
        df.get((RowSelector::Positions(vec![0, 7]), ColSelector::Index(0))),
        Err(DataError::IndexOutOfBounds { index: 7, len: 3 })
    ));
    assert!(matches!(
        df.get((RowSelector::Slice(Slice::full().with_step(0)), ColSelector::Index(0))),
        Err(DataError::InvalidParameter(_))
    ));
}

#[test]
fn test_slice_indices() {
    assert_eq!(Slice::new(Some(-2), None).indices(5).unwrap(), vec![3, 4]);
    assert_eq!(Slice::new(Some(1), Some(100)).indices(3).unwrap(), vec![1, 2]);
    assert_eq!(
        Slice::full().with_step(2).indices(5).unwrap(),
        vec![0, 2, 4]
    );
    assert!(Slice::new(Some(3), Some(1)).indices(5).unwrap().is_empty());
}

#[test]
fn test_slice_extreme_steps() {
    assert_eq!(
        Slice::new(Some(1), None).with_step(isize::MAX).indices(3).unwrap(),
        vec![1]
    );
    assert_eq!(
        Slice::full().with_step(isize::MIN).indices(3).unwrap(),
        vec![2]
    );

    let df = sample_df();
    let picked = df
        .get(Selector::Cells(
            RowSelector::Slice(Slice::full().with_step(isize::MAX)),
            ColSelector::Name("a"),
        ))
        .unwrap();
    assert_eq!(picked.column("a").unwrap(), &Column::int(vec![1]));
}

// ==================== Mutation ====================

#[test]
fn test_set_columns() {
    let mut df = sample_df();

    df.set_columns(["x", "y", "z"]).unwrap();
    assert_eq!(df.columns(), vec!["x", "y", "z"]);
    assert_eq!(df.column("x").unwrap(), &Column::int(vec![1, 2, 3]));

    assert!(matches!(
        df.set_columns(["p", "q"]),
        Err(DataError::DimensionMismatch { .. })
    ));
    assert!(matches!(
        df.set_columns(["p", "p", "q"]),
        Err(DataError::DuplicateColumn(_))
    ));
    assert!(matches!(
        df.set_columns(["p", "", "q"]),
        Err(DataError::EmptyColumnName)
    ));
    assert_eq!(df.columns(), vec!["x", "y", "z"]);
}

#[test]
fn test_set() {
    let mut df = sample_df();

    df.set("d", Column::int(vec![7, 8, 9])).unwrap();
    assert_eq!(df.columns(), vec!["a", "b", "c", "d"]);

    df.set("a", 0).unwrap();
    assert_eq!(df.columns(), vec!["a", "b", "c", "d"]);
    assert_eq!(df.column("a").unwrap(), &Column::int(vec![0, 0, 0]));

    let doubled = df.get("b").unwrap().mul(2.0).unwrap();
    df.set("e", doubled).unwrap();
    assert_eq!(df.column("e").unwrap(), &Column::float(vec![8.0, 10.0, 12.0]));

    assert!(matches!(
        df.set("f", Column::int(vec![1, 2])),
        Err(DataError::DimensionMismatch { .. })
    ));
    assert!(matches!(
        df.set("f", Value::Null),
        Err(DataError::TypeMismatch { .. })
    ));
    let two = df.get(vec!["a", "b"]).unwrap();
    assert!(matches!(
        df.set("f", two),
        Err(DataError::DimensionMismatch { .. })
    ));
    assert!(matches!(df.set("", 1), Err(DataError::EmptyColumnName)));
    assert_eq!(df.ncols(), 5);

    let mut empty = DataFrame::new();
    empty.set("x", vec![1.0, 2.0]).unwrap();
    assert_eq!(empty.shape(), (2, 1));
}

#[test]
fn test_head_tail_rename_drop() {
    let df = sample_df();

    assert_eq!(df.head(2).unwrap().column("a").unwrap(), &Column::int(vec![1, 2]));
    assert_eq!(df.tail(1).unwrap().column("a").unwrap(), &Column::int(vec![3]));
    assert_eq!(df.head(10).unwrap().len(), 3);

    let renamed = df.rename([("a", "alpha"), ("nope", "ignored")]).unwrap();
    assert_eq!(renamed.columns(), vec!["alpha", "b", "c"]);

    let dropped = df.drop(&["b", "nope"]).unwrap();
    assert_eq!(dropped.columns(), vec!["a", "c"]);
}

#[test]
fn test_dtypes_and_values() {
    let df = sample_df();

    let dtypes = df.dtypes().unwrap();
    assert_eq!(dtypes.columns(), vec!["column name", "data type"]);
    assert_eq!(
        dtypes.column("data type").unwrap(),
        &Column::text(["int", "float", "string"])
    );

    let values = df.values();
    assert_eq!(values.shape(), &[3, 3]);
    assert_eq!(values[[1, 2]], Value::from("y"));
    assert_eq!(values[[2, 0]], Value::Int(3));
}

// ==================== Aggregation ====================

#[test]
fn test_aggregations() {
    let df = sample_df();

    let min = df.min().unwrap();
    assert_eq!(min.columns(), vec!["a", "b", "c"]);
    assert_eq!(min.column("c").unwrap(), &Column::text(["x"]));

    let mean = df.mean().unwrap();
    assert_eq!(mean.columns(), vec!["a", "b"]);
    assert_abs_diff_eq!(float_at(&mean, "a", 0), 2.0);
    assert_abs_diff_eq!(float_at(&mean, "b", 0), 5.0);

    let sum = df.sum().unwrap();
    assert_eq!(sum.column("a").unwrap(), &Column::int(vec![6]));
    assert_eq!(sum.column("c").unwrap(), &Column::text(["xyz"]));

    let var = df.var().unwrap();
    assert_abs_diff_eq!(float_at(&var, "a", 0), 2.0 / 3.0, epsilon = 1e-12);
    let std = df.std().unwrap();
    assert_abs_diff_eq!(float_at(&std, "b", 0), (2.0f64 / 3.0).sqrt(), epsilon = 1e-12);

    assert_eq!(df.argmax().unwrap().column("b").unwrap(), &Column::int(vec![2]));
    assert_eq!(df.argmin().unwrap().column("c").unwrap(), &Column::int(vec![0]));

    let flags = DataFrame::from_columns(vec![("f", Column::bool(vec![true, false]))]).unwrap();
    assert_eq!(flags.all().unwrap().column("f").unwrap(), &Column::bool(vec![false]));
    assert_eq!(flags.any().unwrap().column("f").unwrap(), &Column::bool(vec![true]));
    assert_eq!(flags.sum().unwrap().column("f").unwrap(), &Column::int(vec![1]));
}

#[test]
fn test_all_object_aggregation_drops_every_column() {
    let df = DataFrame::from_columns(vec![
        ("s", Column::text(["a", "b"])),
        ("t", Column::object(vec![Some("c"), None])),
    ])
    .unwrap();

    let mean = df.mean().unwrap();
    assert_eq!(mean.ncols(), 0);

    // a null blocks even the reductions text supports
    assert_eq!(df.max().unwrap().columns(), vec!["s"]);
}

#[test]
fn test_median() {
    let df = DataFrame::from_columns(vec![
        ("f", Column::float(vec![3.0, 1.0, 2.0, 10.0])),
        ("i", Column::int(vec![5, 1, 4, 2])),
    ])
    .unwrap();

    let median = df.median().unwrap();
    assert_abs_diff_eq!(float_at(&median, "f", 0), 2.5);
    assert_abs_diff_eq!(float_at(&median, "i", 0), 3.0);
}

#[test]
fn test_isna_and_count() {
    let df = DataFrame::from_columns(vec![
        ("f", Column::float(vec![1.0, f64::NAN, 3.0])),
        ("s", Column::object(vec![None, None, Some("z")])),
        ("i", Column::int(vec![1, 2, 3])),
    ])
    .unwrap();

    let isna = df.isna().unwrap();
    assert_eq!(isna.column("f").unwrap(), &Column::bool(vec![false, true, false]));
    assert_eq!(isna.column("s").unwrap(), &Column::bool(vec![true, true, false]));

    let count = df.count().unwrap();
    assert_eq!(count.column("f").unwrap(), &Column::int(vec![2]));
    assert_eq!(count.column("s").unwrap(), &Column::int(vec![1]));
    assert_eq!(count.column("i").unwrap(), &Column::int(vec![3]));
}

#[test]
fn test_unique_and_nunique() {
    let df = DataFrame::from_columns(vec![
        ("n", Column::int(vec![3, 1, 3, 2])),
        ("s", Column::text(["b", "a", "b", "b"])),
    ])
    .unwrap();

    let unique = df.unique().unwrap();
    assert_eq!(unique.len(), 2);
    let frames = unique.into_vec();
    assert_eq!(frames[0].column("n").unwrap(), &Column::int(vec![1, 2, 3]));
    assert_eq!(frames[1].column("s").unwrap(), &Column::text(["a", "b"]));

    let single = df.get("s").unwrap().unique().unwrap();
    assert!(matches!(single, Frames::Single(_)));

    let nunique = df.nunique().unwrap();
    assert_eq!(nunique.column("n").unwrap(), &Column::int(vec![3]));
    assert_eq!(nunique.column("s").unwrap(), &Column::int(vec![2]));
}

#[test]
fn test_value_counts() {
    let df = DataFrame::from_columns(vec![("v", Column::text(["x", "x", "y"]))]).unwrap();

    let counts = df.value_counts(false).unwrap().single().unwrap();
    assert_eq!(counts.columns(), vec!["v", "count"]);
    assert_eq!(counts.column("v").unwrap(), &Column::text(["x", "y"]));
    assert_eq!(counts.column("count").unwrap(), &Column::int(vec![2, 1]));

    let normalized = df.value_counts(true).unwrap().single().unwrap();
    assert_abs_diff_eq!(float_at(&normalized, "count", 0), 2.0 / 3.0, epsilon = 1e-12);
    assert_abs_diff_eq!(float_at(&normalized, "count", 1), 1.0 / 3.0, epsilon = 1e-12);
}

#[test]
fn test_value_counts_on_count_column() {
    let df = DataFrame::from_columns(vec![("count", Column::int(vec![1, 1, 2]))]).unwrap();

    let counts = df.value_counts(false).unwrap().single().unwrap();
    assert_eq!(counts.columns(), vec!["count", "count_1"]);
    assert_eq!(counts.column("count").unwrap(), &Column::int(vec![1, 2]));
    assert_eq!(counts.column("count_1").unwrap(), &Column::int(vec![2, 1]));
}

// ==================== Transforms ====================

#[test]
fn test_copy_equals_original() {
    let df = sample_df();
    let copy = df.copy().unwrap();
    assert_eq!(copy, df);

    let with_nan = DataFrame::from_columns(vec![("f", Column::float(vec![f64::NAN, 1.0]))])
        .unwrap();
    assert_eq!(with_nan.copy().unwrap(), with_nan);
}

#[test]
fn test_diff_and_pct_change() {
    let df = DataFrame::from_columns(vec![("a", Column::int(vec![10, 20, 30]))]).unwrap();

    let diff = df.diff(1).unwrap();
    assert_eq!(
        diff.column("a").unwrap(),
        &Column::float(vec![f64::NAN, 10.0, 10.0])
    );

    let pct = df.pct_change(1).unwrap();
    assert_eq!(
        pct.column("a").unwrap(),
        &Column::float(vec![f64::NAN, 1.0, 0.5])
    );

    let back = df.diff(-1).unwrap();
    assert_eq!(
        back.column("a").unwrap(),
        &Column::float(vec![-10.0, -10.0, f64::NAN])
    );

    let all_nan = df.diff(5).unwrap().isna().unwrap().all().unwrap();
    assert_eq!(all_nan.column("a").unwrap(), &Column::bool(vec![true]));
}

#[test]
fn test_cumulative_transforms() {
    let df = DataFrame::from_columns(vec![
        ("i", Column::int(vec![1, 2, 3])),
        ("f", Column::float(vec![1.0, 3.0, 2.0])),
        ("s", Column::text(["a", "b", "c"])),
    ])
    .unwrap();

    let cumsum = df.cumsum().unwrap();
    assert_eq!(cumsum.column("i").unwrap(), &Column::int(vec![1, 3, 6]));
    assert_eq!(cumsum.column("s").unwrap(), df.column("s").unwrap());

    assert_eq!(
        df.cummax().unwrap().column("f").unwrap(),
        &Column::float(vec![1.0, 3.0, 3.0])
    );
    assert_eq!(
        df.cummin().unwrap().column("f").unwrap(),
        &Column::float(vec![1.0, 1.0, 1.0])
    );
}

#[test]
fn test_abs_clip_round() {
    let df = DataFrame::from_columns(vec![
        ("i", Column::int(vec![-3, 1, 5])),
        ("f", Column::float(vec![-1.25, 0.5, 1.5])),
    ])
    .unwrap();

    assert_eq!(df.abs().unwrap().column("i").unwrap(), &Column::int(vec![3, 1, 5]));

    let clipped = df.clip(Some(0.0), Some(1.0)).unwrap();
    assert_eq!(clipped.column("i").unwrap(), &Column::int(vec![0, 1, 1]));
    assert_eq!(clipped.column("f").unwrap(), &Column::float(vec![0.0, 0.5, 1.0]));

    let lower_only = df.clip(Some(2.0), None).unwrap();
    assert_eq!(lower_only.column("i").unwrap(), &Column::int(vec![2, 2, 5]));

    let rounded = df.round(0).unwrap();
    assert_eq!(rounded.column("f").unwrap(), &Column::float(vec![-1.0, 0.0, 2.0]));
    assert_eq!(rounded.column("i").unwrap(), df.column("i").unwrap());

    let tens = DataFrame::from_columns(vec![("i", Column::int(vec![15, 25, 14]))]).unwrap();
    assert_eq!(
        tens.round(-1).unwrap().column("i").unwrap(),
        &Column::int(vec![20, 20, 10])
    );
}

// ==================== Operators ====================

#[test]
fn test_scalar_arithmetic() {
    let df = DataFrame::from_columns(vec![
        ("a", Column::int(vec![1, 2, 3])),
        ("b", Column::float(vec![1.5, 2.5, 3.5])),
    ])
    .unwrap();

    let added = df.add(1).unwrap();
    assert_eq!(added.column("a").unwrap(), &Column::int(vec![2, 3, 4]));
    assert_eq!(added.column("b").unwrap(), &Column::float(vec![2.5, 3.5, 4.5]));

    let divided = df.div(2).unwrap();
    assert_eq!(divided.column("a").unwrap(), &Column::float(vec![0.5, 1.0, 1.5]));

    assert_eq!(df.rsub(10).unwrap().column("a").unwrap(), &Column::int(vec![9, 8, 7]));
    assert_eq!(df.pow(2).unwrap().column("a").unwrap(), &Column::int(vec![1, 4, 9]));
    assert_eq!(df.rpow(2).unwrap().column("a").unwrap(), &Column::int(vec![2, 4, 8]));
    assert_eq!(
        df.rdiv(3.0).unwrap().column("b").unwrap(),
        &Column::float(vec![2.0, 1.2, 3.0 / 3.5])
    );
}

#[test]
fn test_integer_division_rules() {
    let df = DataFrame::from_columns(vec![("a", Column::int(vec![-7, 7, 6]))]).unwrap();

    assert_eq!(df.floordiv(2).unwrap().column("a").unwrap(), &Column::int(vec![-4, 3, 3]));
    assert_eq!(df.floordiv(-2).unwrap().column("a").unwrap(), &Column::int(vec![3, -4, -3]));
    assert_eq!(df.floordiv(0).unwrap().column("a").unwrap(), &Column::int(vec![0, 0, 0]));

    let err = df.pow(-1).unwrap_err();
    assert!(matches!(err, DataError::InvalidParameter(_)));
    assert_eq!(err.kind(), ErrorKind::Value);

    let inverse = df.pow(-1.0).unwrap();
    assert_eq!(inverse.column("a").unwrap().kind(), ColumnKind::Float);
    assert_abs_diff_eq!(float_at(&inverse, "a", 0), -1.0 / 7.0, epsilon = 1e-12);
}

#[test]
fn test_bool_operands_act_as_int() {
    let df = DataFrame::from_columns(vec![("f", Column::bool(vec![true, false]))]).unwrap();

    assert_eq!(df.add(1).unwrap().column("f").unwrap(), &Column::int(vec![2, 1]));
    assert_eq!(df.add(&df).unwrap().column("f").unwrap(), &Column::int(vec![2, 0]));
    assert_eq!(df.eq(true).unwrap().column("f").unwrap(), &Column::bool(vec![true, false]));
}

#[test]
fn test_frame_arithmetic() {
    let left = DataFrame::from_columns(vec![
        ("a", Column::int(vec![1, 2])),
        ("b", Column::float(vec![0.5, 1.0])),
    ])
    .unwrap();
    let right = DataFrame::from_columns(vec![
        ("x", Column::int(vec![10, 20])),
        ("y", Column::int(vec![1, 2])),
    ])
    .unwrap();

    let sum = left.add(&right).unwrap();
    assert_eq!(sum.columns(), vec!["a", "b"]);
    assert_eq!(sum.column("a").unwrap(), &Column::int(vec![11, 22]));
    assert_eq!(sum.column("b").unwrap(), &Column::float(vec![1.5, 3.0]));

    let narrow = right.get("x").unwrap();
    assert!(matches!(
        left.add(&narrow),
        Err(DataError::DimensionMismatch { .. })
    ));
}

#[test]
fn test_comparisons() {
    let df = DataFrame::from_columns(vec![
        ("f", Column::float(vec![f64::NAN, 1.0, 2.0])),
        ("s", Column::object(vec![Some("a"), None, Some("c")])),
    ])
    .unwrap();

    let f = df.get("f").unwrap();
    assert_eq!(f.eq(1.0).unwrap().column("f").unwrap(), &Column::bool(vec![false, true, false]));
    assert_eq!(f.ne(1.0).unwrap().column("f").unwrap(), &Column::bool(vec![true, false, true]));
    assert_eq!(f.ge(1).unwrap().column("f").unwrap(), &Column::bool(vec![false, true, true]));

    let s = df.get("s").unwrap();
    assert_eq!(
        s.eq(Value::Null).unwrap().column("s").unwrap(),
        &Column::bool(vec![false, true, false])
    );
    assert_eq!(s.ne("a").unwrap().column("s").unwrap(), &Column::bool(vec![false, true, true]));
    assert_eq!(s.eq(1).unwrap().column("s").unwrap(), &Column::bool(vec![false, false, false]));
    assert!(matches!(s.gt("b"), Err(DataError::Unsupported { .. })));
}

#[test]
fn test_string_operators() {
    let df = DataFrame::from_columns(vec![("s", Column::text(["ab", "cd"]))]).unwrap();

    assert_eq!(df.add("!").unwrap().column("s").unwrap(), &Column::text(["ab!", "cd!"]));
    assert_eq!(df.radd(">").unwrap().column("s").unwrap(), &Column::text([">ab", ">cd"]));
    assert_eq!(df.lt("b").unwrap().column("s").unwrap(), &Column::bool(vec![true, false]));

    let err = df.sub("a").unwrap_err();
    assert!(matches!(err, DataError::Unsupported { .. }));
    assert_eq!(err.kind(), ErrorKind::Type);
    assert!(matches!(df.mul(2), Err(DataError::TypeMismatch { .. })));
}

// ==================== Reshaping ====================

#[test]
fn test_sort_values_is_stable() {
    let df = DataFrame::from_columns(vec![
        ("a", Column::int(vec![3, 1, 2, 1])),
        ("b", Column::text(["w", "x", "y", "z"])),
    ])
    .unwrap();

    let asc = df.sort_values(&["a"], true).unwrap();
    assert_eq!(asc.column("a").unwrap(), &Column::int(vec![1, 1, 2, 3]));
    assert_eq!(asc.column("b").unwrap(), &Column::text(["x", "z", "y", "w"]));

    let desc = df.sort_values(&["a"], false).unwrap();
    assert_eq!(desc.column("a").unwrap(), &Column::int(vec![3, 2, 1, 1]));
    assert_eq!(desc.column("b").unwrap(), &Column::text(["w", "y", "x", "z"]));

    let mixed = Arrange::new(&df).by("a", true).by("b", false).execute().unwrap();
    assert_eq!(mixed.column("b").unwrap(), &Column::text(["z", "x", "y", "w"]));

    assert!(matches!(
        df.sort_values(&["nope"], true),
        Err(DataError::ColumnNotFound(_))
    ));
}

#[test]
fn test_sort_values_missing_last() {
    let df = DataFrame::from_columns(vec![
        ("f", Column::float(vec![2.0, f64::NAN, 1.0])),
        ("s", Column::object(vec![None, Some("b"), Some("a")])),
    ])
    .unwrap();

    let asc = df.sort_values(&["f"], true).unwrap();
    assert_eq!(asc.column("f").unwrap(), &Column::float(vec![1.0, 2.0, f64::NAN]));
    let desc = df.sort_values(&["f"], false).unwrap();
    assert_eq!(desc.column("f").unwrap(), &Column::float(vec![2.0, 1.0, f64::NAN]));

    let by_text = df.sort_values(&["s"], false).unwrap();
    assert_eq!(
        by_text.column("s").unwrap(),
        &Column::object(vec![Some("b"), Some("a"), None])
    );
}

#[test]
fn test_sample() {
    let df = DataFrame::from_columns(vec![("a", Column::int((0..10).collect::<Vec<i64>>()))])
        .unwrap();

    let first = df.sample(SampleSize::Count(4), false, Some(42)).unwrap();
    let second = df.sample(SampleSize::Count(4), false, Some(42)).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 4);
    assert_eq!(first.nunique().unwrap().column("a").unwrap(), &Column::int(vec![4]));

    let half = df.sample(SampleSize::Fraction(0.5), false, Some(7)).unwrap();
    assert_eq!(half.len(), 5);

    let everything = df.sample(SampleSize::Count(10), false, Some(1)).unwrap();
    assert_eq!(everything.sort_values(&["a"], true).unwrap(), df);

    let many = df.sample(SampleSize::Count(25), true, Some(3)).unwrap();
    assert_eq!(many.len(), 25);

    assert!(matches!(
        df.sample(SampleSize::Count(11), false, None),
        Err(DataError::DimensionMismatch { .. })
    ));
    assert!(matches!(
        df.sample(SampleSize::Fraction(-0.5), false, None),
        Err(DataError::InvalidParameter(_))
    ));
    assert!(matches!(
        df.sample(SampleSize::Fraction(1e300), true, None),
        Err(DataError::InvalidParameter(_))
    ));
    assert!(matches!(
        df.sample(SampleSize::Count(usize::MAX), true, None),
        Err(DataError::InvalidParameter(_))
    ));
}

fn fruit_df() -> DataFrame {
    DataFrame::from_columns(vec![
        ("state", Column::text(["b", "a", "b", "a"])),
        ("fruit", Column::text(["apple", "apple", "apple", "pear"])),
        ("weight", Column::float(vec![3.0, 1.0, 5.0, 2.0])),
    ])
    .unwrap()
}

#[test]
fn test_pivot_table_rows_and_columns() {
    let df = fruit_df();

    let pivot = df
        .pivot_table(
            Some("state"),
            Some("fruit"),
            Some("weight"),
            PivotAgg::Reduce(Reduction::Sum),
        )
        .unwrap();

    assert_eq!(pivot.columns(), vec!["state", "apple", "pear"]);
    assert_eq!(pivot.column("state").unwrap(), &Column::text(["a", "b"]));
    assert_eq!(pivot.column("apple").unwrap(), &Column::float(vec![1.0, 8.0]));
    assert_eq!(pivot.column("pear").unwrap(), &Column::float(vec![2.0, f64::NAN]));

    let sizes = df
        .pivot_table(Some("state"), Some("fruit"), None, PivotAgg::Size)
        .unwrap();
    assert_eq!(sizes.column("apple").unwrap(), &Column::int(vec![1, 2]));
    assert_eq!(sizes.column("pear").unwrap(), &Column::float(vec![1.0, f64::NAN]));
}

#[test]
fn test_pivot_table_single_key() {
    let df = fruit_df();

    let by_state = df
        .pivot_table(Some("state"), None, Some("weight"), Reduction::Mean.into())
        .unwrap();
    assert_eq!(by_state.columns(), vec!["state", "mean"]);
    assert_eq!(by_state.column("mean").unwrap(), &Column::float(vec![1.5, 4.0]));

    let by_fruit = df
        .pivot_table(None, Some("fruit"), None, PivotAgg::Size)
        .unwrap();
    assert_eq!(by_fruit.shape(), (1, 2));
    assert_eq!(by_fruit.column("apple").unwrap(), &Column::int(vec![3]));
    assert_eq!(by_fruit.column("pear").unwrap(), &Column::int(vec![1]));
}

#[test]
fn test_pivot_table_errors() {
    let df = fruit_df();

    assert!(matches!(
        df.pivot_table(None, None, Some("weight"), PivotAgg::Size),
        Err(DataError::InvalidParameter(_))
    ));
    assert!(matches!(
        df.pivot_table(Some("state"), None, None, Reduction::Sum.into()),
        Err(DataError::InvalidParameter(_))
    ));
    assert!(matches!(
        df.pivot_table(Some("nope"), None, None, PivotAgg::Size),
        Err(DataError::ColumnNotFound(_))
    ));
}

#[test]
fn test_pivot_table_name_clashes() {
    let df = DataFrame::from_columns(vec![
        ("k", Column::text(["a", "a", "b"])),
        ("c", Column::text(["k", "x", "k"])),
    ])
    .unwrap();

    let pivot = df
        .pivot_table(Some("k"), Some("c"), None, PivotAgg::Size)
        .unwrap();
    assert_eq!(pivot.columns(), vec!["k", "k_1", "x"]);
    assert_eq!(pivot.column("k").unwrap(), &Column::text(["a", "b"]));
    assert_eq!(pivot.column("k_1").unwrap(), &Column::int(vec![1, 1]));

    let df = DataFrame::from_columns(vec![("size", Column::int(vec![2, 2, 3]))]).unwrap();
    let sizes = df
        .pivot_table(Some("size"), None, None, PivotAgg::Size)
        .unwrap();
    assert_eq!(sizes.columns(), vec!["size", "size_1"]);
    assert_eq!(sizes.column("size_1").unwrap(), &Column::int(vec![2, 1]));
}

// ==================== String methods ====================

fn words_df() -> DataFrame {
    DataFrame::from_columns(vec![
        (
            "w",
            Column::object(vec![Some("hello world"), None, Some("Abc")]),
        ),
        ("n", Column::int(vec![1, 2, 3])),
    ])
    .unwrap()
}

#[test]
fn test_string_case_methods() {
    let df = words_df();
    let s = df.str();

    assert_eq!(
        s.upper("w").unwrap().column("w").unwrap(),
        &Column::object(vec![Some("HELLO WORLD"), None, Some("ABC")])
    );
    assert_eq!(
        s.title("w").unwrap().column("w").unwrap(),
        &Column::object(vec![Some("Hello World"), None, Some("Abc")])
    );
    assert_eq!(
        s.swapcase("w").unwrap().column("w").unwrap(),
        &Column::object(vec![Some("HELLO WORLD"), None, Some("aBC")])
    );
    assert_eq!(
        s.capitalize("w").unwrap().column("w").unwrap(),
        &Column::object(vec![Some("Hello world"), None, Some("Abc")])
    );
    assert_eq!(
        s.istitle("w").unwrap().column("w").unwrap(),
        &Column::bool(vec![false, false, true])
    );
    assert_eq!(
        s.islower("w").unwrap().column("w").unwrap(),
        &Column::bool(vec![true, false, false])
    );
}

#[test]
fn test_string_search_methods() {
    let df = words_df();
    let s = df.str();

    assert_eq!(
        s.len("w").unwrap().column("w").unwrap(),
        &Column::float(vec![11.0, f64::NAN, 3.0])
    );
    assert_eq!(
        s.find("w", "o", None, None).unwrap().column("w").unwrap(),
        &Column::float(vec![4.0, f64::NAN, -1.0])
    );
    assert_eq!(
        s.find("w", "o", Some(5), None).unwrap().column("w").unwrap(),
        &Column::float(vec![7.0, f64::NAN, -1.0])
    );
    assert_eq!(
        s.count("w", "l", None, None).unwrap().column("w").unwrap(),
        &Column::float(vec![3.0, f64::NAN, 0.0])
    );
    assert_eq!(
        s.startswith("w", "he", None, None).unwrap().column("w").unwrap(),
        &Column::bool(vec![true, false, false])
    );
    assert_eq!(
        s.endswith("w", "wor", None, Some(-2)).unwrap().column("w").unwrap(),
        &Column::bool(vec![true, false, false])
    );
    assert_eq!(
        s.get("w", -1).unwrap().column("w").unwrap(),
        &Column::object(vec![Some("d"), None, Some("c")])
    );
    assert!(matches!(
        s.index("w", "zz", None, None),
        Err(DataError::InvalidParameter(_))
    ));
}

#[test]
fn test_string_padding_and_stripping() {
    let df = DataFrame::from_columns(vec![(
        "s",
        Column::text(["ab", "-42", "xyhixy"]),
    )])
    .unwrap();
    let s = df.str();

    assert_eq!(
        s.center("s", 5, Some('*')).unwrap().column("s").unwrap(),
        &Column::text(["**ab*", "*-42*", "xyhixy"])
    );
    assert_eq!(
        s.zfill("s", 5).unwrap().column("s").unwrap(),
        &Column::text(["000ab", "-0042", "xyhixy"])
    );
    assert_eq!(
        s.strip("s", Some("xy")).unwrap().column("s").unwrap(),
        &Column::text(["ab", "-42", "hi"])
    );
    assert_eq!(
        s.replace("s", "xy", "_", Some(1)).unwrap().column("s").unwrap(),
        &Column::text(["ab", "-42", "_hixy"])
    );
    assert_eq!(
        s.isdecimal("s").unwrap().column("s").unwrap(),
        &Column::bool(vec![false, false, false])
    );
}

#[test]
fn test_isdecimal_is_ascii_only() {
    let df = DataFrame::from_columns(vec![("s", Column::text(["0123", "\u{663}", "\u{bd}", ""]))])
        .unwrap();

    assert_eq!(
        df.str().isdecimal("s").unwrap().column("s").unwrap(),
        &Column::bool(vec![true, false, false, false])
    );
}

#[test]
fn test_string_methods_reject_non_text() {
    let df = words_df();

    let err = df.str().upper("n").unwrap_err();
    assert!(matches!(err, DataError::TypeMismatch { .. }));
    assert_eq!(err.kind(), ErrorKind::Type);
    assert!(matches!(
        df.str().upper("missing"),
        Err(DataError::ColumnNotFound(_))
    ));
}

// ==================== Presentation ====================

#[test]
fn test_to_html() {
    let df = DataFrame::from_columns(vec![
        ("a", Column::int(vec![1, 2])),
        ("b", Column::float(vec![1.5, f64::NAN])),
        ("c", Column::object(vec![Some("x"), None])),
        ("d", Column::bool(vec![true, false])),
    ])
    .unwrap();

    let html = df.to_html();
    assert!(html.starts_with("<table><thead><tr><th></th><th>a         </th>"));
    assert!(html.contains("<td><strong>1</strong></td>"));
    assert!(html.contains("<td>     1.500</td>"));
    assert!(html.contains("<td>None      </td>"));
    assert!(html.contains("<td>true</td>"));
    assert!(html.ends_with("</tbody></table>"));
    assert!(!html.contains("..."));
}

#[test]
fn test_to_html_truncates_long_tables() {
    let df = DataFrame::from_columns(vec![("a", Column::int((0..25).collect::<Vec<i64>>()))])
        .unwrap();

    let html = df.to_html();
    assert_eq!(html.matches("<tr>").count(), 1 + 10 + 1 + 10);
    assert!(html.contains("<td><strong>9</strong></td>"));
    assert!(html.contains("<td><strong>15</strong></td>"));
    assert!(!html.contains("<td><strong>12</strong></td>"));
    assert!(html.contains("<td>...</td>"));

    let options = DisplayOptions::default()
        .with_head_rows(2)
        .with_tail_rows(1)
        .with_float_precision(1);
    let short = df.to_html_with(&options);
    assert_eq!(short.matches("<tr>").count(), 1 + 2 + 1 + 1);
}

#[test]
fn test_display_text() {
    let df = sample_df();
    let text = df.to_string();

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].ends_with("c"));
    assert!(lines[1].contains("4.000"));
}
