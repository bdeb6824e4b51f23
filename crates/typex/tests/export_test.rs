use typex::{
    TypeExporter, TypexError,
    config::{AppConfig, FilterConfig, LayoutKind, OutputConfig},
    error::ProviderError,
    render::Dialect,
    types::{BasicKind, ChanDir, Field, Interface, Method, Signature, Struct, Tuple, Type},
    universe::{Package, Universe},
};

const P1: &str = "example.com/typex/testdata/p1";
const P2: &str = "example.com/typex/testdata/p2";
const P3: &str = "example.com/typex/testdata/p2/p3";

fn named(package: &str, name: &str) -> Type {
    Type::named(&format!("{package}.{name}"))
}

fn qualified(package: &str, name: &str) -> String {
    format!("{package}.{name}")
}

/// A package with cycles, embedding, tags and unexported members.
fn p1() -> Universe {
    Universe::new()
        .with_package(
            Package::new(P1)
                .with_declaration("T", named(P1, "T"))
                .with_declaration("X", named(P1, "X"))
                .with_declaration("x", named(P1, "x")),
        )
        .with_type(
            &qualified(P1, "T"),
            Struct::new(vec![
                Field::new("notExported", BasicKind::Bool.into()),
                Field::embedded(named(P1, "X")).with_tag(r#"embedded:"",json:"-""#),
                Field::new("UnExported", BasicKind::Bool.into()).with_tag(r#"json:"-""#),
                Field::new("AnyTagName", BasicKind::Bool.into())
                    .with_tag(r#"json:"otherTagName,omitempty""#),
                Field::new("C", Type::pointer(named(P1, "T"))),
            ])
            .into(),
        )
        .with_type(
            &qualified(P1, "X"),
            Struct::new(vec![
                Field::new(
                    "Y",
                    Type::map(
                        Type::pointer(BasicKind::Int64.into()),
                        Type::pointer(Type::pointer(named(P1, "x"))),
                    ),
                ),
                Field::new(
                    "Z",
                    Type::map(Type::pointer(named(P1, "X")), Type::named("time.Duration")),
                ),
            ])
            .into(),
        )
        .with_type(
            &qualified(P1, "x"),
            Type::map(BasicKind::Int64.into(), Type::named("time.Time")),
        )
        .with_type(
            "time.Time",
            Struct::new(vec![Field::new("wall", BasicKind::Uint64.into())]).into(),
        )
        .with_type("time.Duration", BasicKind::Int64.into())
}

/// A package exercising every kind of composite.
fn p2() -> Universe {
    let func = Signature::new(
        Tuple::unnamed([
            Type::pointer(named(P2, "I")),
            Type::slice(Type::pointer(named(P3, "U"))),
        ]),
        Tuple::unnamed([named(P2, "T"), Type::named("error")]),
    )
    .variadic();

    Universe::new()
        .with_package(
            Package::new(P2)
                .with_declaration("F", named(P2, "F"))
                .with_declaration("I", named(P2, "I"))
                .with_declaration("S", named(P2, "S"))
                .with_declaration("T", named(P2, "T")),
        )
        .with_type(&qualified(P2, "I"), BasicKind::Int.into())
        .with_type(&qualified(P2, "F"), func.into())
        .with_type(
            &qualified(P2, "S"),
            Struct::new(vec![Field::new(
                "Fn",
                Type::pointer(Type::pointer(named(P2, "F"))),
            )])
            .into(),
        )
        .with_type(
            &qualified(P2, "T"),
            Struct::new(vec![
                Field::new("ArrayType", Type::array(10, BasicKind::String.into())),
                Field::new("IntType", named(P2, "I")),
                Field::new("UintType", named(P3, "U")),
                Field::new(
                    "ChanType",
                    Type::chan(ChanDir::RecvOnly, Type::pointer(BasicKind::Bool.into())),
                ),
                Field::new(
                    "MapType",
                    Type::map(Type::pointer(BasicKind::Int.into()), BasicKind::String.into()),
                ),
                Field::new(
                    "FuncStruct",
                    Type::chan(ChanDir::SendOnly, Type::pointer(named(P2, "S"))),
                )
                .with_tag(r#"json:"funcStruct""#),
                Field::new("Types", Type::pointer(named(P2, "T"))).with_tag(r#"tags:"types""#),
            ])
            .into(),
        )
        .with_type(&qualified(P3, "U"), BasicKind::Uint.into())
        .with_type(
            "error",
            Interface::new(
                vec![],
                vec![Method::new(
                    "Error",
                    Signature::new(Tuple::default(), Tuple::unnamed([BasicKind::String.into()])),
                )],
            )
            .into(),
        )
}

fn provider(universe: Universe) -> impl Fn(&[String]) -> Result<Universe, ProviderError> {
    move |_: &[String]| Ok(universe.clone())
}

fn config(dialect: Dialect, unexported: bool) -> AppConfig {
    AppConfig::new(
        FilterConfig::new(vec![], vec![], vec![".*/testdata:".to_string()]),
        OutputConfig::new(dialect, unexported),
    )
}

fn export(universe: Universe, config: AppConfig) -> Result<String, TypexError> {
    let mut out = Vec::new();
    TypeExporter::new(config).export(&provider(universe), &["./...".to_string()], &mut out)?;
    Ok(String::from_utf8(out).expect("output is UTF-8"))
}

#[test]
fn test_go_tree_p1() {
    let output = export(p1(), config(Dialect::Go, false)).unwrap();
    assert_eq!(
        output,
        concat!(
            "├── p1\n",
            "│   ├── T struct {\n",
            "│   │       p1.X\t\t`embedded:\"\",json:\"-\"`\n",
            "│   │       UnExported bool\t\t`json:\"-\"`\n",
            "│   │       AnyTagName bool\t\t`json:\"otherTagName,omitempty\"`\n",
            "│   │       C *p1.T\n",
            "│   │   }\n",
            "│   ├── X struct {\n",
            "│   │       Y map[*int64]**p1.x\n",
            "│   │       Z map[*p1.X]time.Duration\n",
            "│   │   }\n",
            "│   └── x map[int64]time.Time\n",
            "└── time\n",
            "    ├── Duration int64\n",
            "    └── Time struct {}\n",
        )
    );
}

#[test]
fn test_go_tree_p2() {
    let output = export(p2(), config(Dialect::Go, false)).unwrap();
    assert_eq!(
        output,
        concat!(
            "├── error interface {\n",
            "│       Error() string\n",
            "│   }\n",
            "└── p2\n",
            "    ├── F func(*p2.I, ...*p3.U) (p2.T, error)\n",
            "    ├── I int\n",
            "    ├── S struct {\n",
            "    │       Fn **p2.F\n",
            "    │   }\n",
            "    ├── T struct {\n",
            "    │       ArrayType [10]string\n",
            "    │       IntType p2.I\n",
            "    │       UintType p3.U\n",
            "    │       ChanType <-chan *bool\n",
            "    │       MapType map[*int]string\n",
            "    │       FuncStruct chan<- *p2.S\t\t`json:\"funcStruct\"`\n",
            "    │       Types *p2.T\t\t`tags:\"types\"`\n",
            "    │   }\n",
            "    └── p3\n",
            "        └── U uint\n",
        )
    );
}

#[test]
fn test_ts_type_modules_p2() {
    let output = export(p2(), config(Dialect::TsType, false)).unwrap();
    assert_eq!(
        output,
        concat!(
            "export type error = any\n",
            "export module p2 {\n",
            "    export type F = any\n",
            "    export type I = number\n",
            "    export type S = {\n",
            "        Fn: any,\n",
            "    }\n",
            "    export type T = {\n",
            "        ArrayType: string[],\n",
            "        IntType: p2.I,\n",
            "        UintType: p2.p3.U,\n",
            "        ChanType: any,\n",
            "        MapType: Record<symbol, string>,\n",
            "        funcStruct: any,\n",
            "        Types: T,\n",
            "    }\n",
            "    export module p3 {\n",
            "        export type U = number\n",
            "    }\n",
            "}\n",
        )
    );
}

#[test]
fn test_ts_class_modules_p1() {
    let output = export(p1(), config(Dialect::TsClass, false)).unwrap();
    assert_eq!(
        output,
        concat!(
            "export module p1 {\n",
            "    export class T {\n",
            "        constructor(\n",
            "            readonly X: p1.X,\n",
            "            readonly otherTagName?: boolean,\n",
            "            readonly C: T,\n",
            "        ) {}\n",
            "    }\n",
            "    export class X {\n",
            "        constructor(\n",
            "            readonly Y: Record<symbol, p1.x>,\n",
            "            readonly Z: Record<symbol, time.Duration>,\n",
            "        ) {}\n",
            "    }\n",
            "    export type x = Record<number, time.Time>\n",
            "}\n",
            "export module time {\n",
            "    export type Duration = number\n",
            "    export class Time {\n",
            "        constructor() {}\n",
            "    }\n",
            "}\n",
        )
    );
}

#[test]
fn test_layout_override() {
    let mut config = config(Dialect::Go, false);
    config.output_mut().set_layout(LayoutKind::Module);

    let output = export(p2(), config).unwrap();
    assert!(output.starts_with("error interface {\n    Error() string\n}\nexport module p2 {\n"));
    assert!(output.ends_with("    export module p3 {\n        U uint\n    }\n}\n"));
}

#[test]
fn test_unexported_members_included() {
    let exporter = TypeExporter::new(config(Dialect::Go, true));
    let graph = exporter.inspect(&provider(p1()), &["p1".to_string()]).unwrap();
    let paths = exporter.render(&graph);

    assert_eq!(
        paths["p1/T"],
        concat!(
            "T struct {\n",
            "    notExported bool\n",
            "    p1.X\t\t`embedded:\"\",json:\"-\"`\n",
            "    UnExported bool\t\t`json:\"-\"`\n",
            "    AnyTagName bool\t\t`json:\"otherTagName,omitempty\"`\n",
            "    C *p1.T\n",
            "}",
        )
    );
    assert_eq!(paths["time/Time"], "Time struct {\n    wall uint64\n}");
}

#[test]
fn test_include_and_exclude_filters() {
    let mut config = config(Dialect::Go, false);
    config.filter_mut().extend_include(["p2".to_string()]);
    config.filter_mut().extend_exclude([r"\.[FT]$".to_string()]);

    let exporter = TypeExporter::new(config);
    let graph = exporter.inspect(&provider(p2()), &["p2".to_string()]).unwrap();
    let names: Vec<String> = graph.names().map(ToString::to_string).collect();
    assert_eq!(
        names,
        [
            qualified(P2, "I"),
            qualified(P2, "S"),
            qualified(P2, "F"),
            qualified(P3, "U"),
            qualified(P2, "T"),
            "error".to_string(),
        ]
    );
}

#[test]
fn test_relocation_rules() {
    let config = AppConfig::new(
        FilterConfig::new(
            vec![],
            vec![],
            vec![
                "^example.com/typex/:".to_string(),
                "testdata/p2/p3:lib".to_string(),
                "malformed".to_string(),
            ],
        ),
        OutputConfig::new(Dialect::Go, false),
    );
    let exporter = TypeExporter::new(config);
    let graph = exporter.inspect(&provider(p2()), &["p2".to_string()]).unwrap();
    let paths = exporter.render(&graph);

    let keys: Vec<&str> = paths.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        ["error", "lib/U", "testdata/p2/F", "testdata/p2/I", "testdata/p2/S", "testdata/p2/T"]
    );
    assert_eq!(paths["testdata/p2/F"], "F func(*p2.I, ...*lib.U) (p2.T, error)");
}

#[test]
fn test_output_is_deterministic() {
    for dialect in [Dialect::Go, Dialect::TsType, Dialect::TsClass] {
        let first = export(p1(), config(dialect, false)).unwrap();
        let second = export(p1(), config(dialect, false)).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_no_patterns_prints_nothing() {
    let mut out = Vec::new();
    TypeExporter::default()
        .export(&provider(p1()), &[], &mut out)
        .unwrap();
    assert!(out.is_empty());
}

#[test]
fn test_fatal_errors_print_nothing() {
    let failing =
        |_: &[String]| -> Result<Universe, ProviderError> { Err("no such module".into()) };
    let mut out = Vec::new();
    let err = TypeExporter::default()
        .export(&failing, &["x".to_string()], &mut out)
        .unwrap_err();
    assert!(matches!(err, TypexError::Provider(_)));
    assert!(out.is_empty());

    let broken = p1()
        .with_package(Package::new("example.com/bad").with_diagnostic("bad.go:1:9: expected ';'"));
    let err = export(broken, config(Dialect::Go, false)).unwrap_err();
    assert_eq!(err.to_string(), "bad.go:1:9: expected ';'");

    let dangling = Universe::new()
        .with_package(Package::new("p").with_declaration("T", Type::named("p.T")))
        .with_type("p.T", Type::slice(Type::named("q.Missing")));
    let err = export(dangling, config(Dialect::TsType, false)).unwrap_err();
    assert_eq!(err.to_string(), "Unresolved type: q.Missing");
}
