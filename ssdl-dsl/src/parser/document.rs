//! Section and record grammars
//!
//! The document grammar: four top-level sections introduced by `.service`,
//! `.data`, `.application` and `.deployment`, each exactly once, in any
//! order. Record fields may likewise appear in any order; every record parser
//! collects fields into options and checks for missing ones only after its
//! closing brace, so a structural problem inside a record always wins over a
//! missing-field report.

use super::Parser;
use crate::error::{ParseError, StructuralError, ValidationError};
use crate::lexer::{Span, TokenKind};
use crate::registry;
use ssdl_core::{
    AppLayout, AppType, Application, Deployment, DeploymentEnv, DeploymentType, Mapping, Provider,
    Query, Scope, Sensor, SensorData, SensorFormat, SensorType, Ssdl, ValueType, VisType,
    Visualization,
};
use std::str::FromStr;

impl<'a> Parser<'a> {
    /// Parse the whole document and consume all input.
    pub fn parse_document(&mut self) -> Result<Ssdl, ParseError> {
        let mut service = None;
        let mut data = None;
        let mut application = None;
        let mut deployment = None;

        while !self.is_at_end() {
            self.guard_lex()?;
            self.expect(TokenKind::Dot)?;
            self.guard_lex()?;
            match &self.current().kind {
                TokenKind::Service => {
                    self.begin_section(".service", service.is_some())?;
                    service = Some(
                        self.parse_service()
                            .map_err(|e| e.in_context("the `.service` section"))?,
                    );
                }
                TokenKind::Data => {
                    self.begin_section(".data", data.is_some())?;
                    data = Some(
                        self.parse_data()
                            .map_err(|e| e.in_context("the `.data` section"))?,
                    );
                }
                TokenKind::Application => {
                    self.begin_section(".application", application.is_some())?;
                    application = Some(
                        self.parse_application()
                            .map_err(|e| e.in_context("the `.application` section"))?,
                    );
                }
                TokenKind::Deployment => {
                    self.begin_section(".deployment", deployment.is_some())?;
                    deployment = Some(
                        self.parse_deployment()
                            .map_err(|e| e.in_context("the `.deployment` section"))?,
                    );
                }
                TokenKind::Identifier(s) => {
                    return Err(self.error(StructuralError::UnknownSection {
                        key: format!(".{}", s),
                    }));
                }
                _ => return Err(self.unexpected("section key")),
            }
        }

        // Completeness is checked last and in declaration order, so parse
        // errors inside a present section always surface first.
        let service = service.ok_or_else(|| self.missing_section(".service"))?;
        let data = data.ok_or_else(|| self.missing_section(".data"))?;
        let application = application.ok_or_else(|| self.missing_section(".application"))?;
        let deployment = deployment.ok_or_else(|| self.missing_section(".deployment"))?;

        Ok(Ssdl {
            service,
            data,
            application,
            deployment,
        })
    }

    fn begin_section(&mut self, key: &str, seen: bool) -> Result<(), ParseError> {
        if seen {
            return Err(self.error(StructuralError::DuplicateSection {
                key: key.to_string(),
            }));
        }
        self.advance();
        Ok(())
    }

    fn missing_section(&self, key: &str) -> ParseError {
        self.error(ValidationError::MissingSection {
            key: key.to_string(),
        })
    }

    fn missing_field(&self, record: &str, field: &str) -> ParseError {
        self.error(ValidationError::MissingField {
            record: record.to_string(),
            field: field.to_string(),
        })
    }

    /// Record a field occurrence; a repeat of an already-seen field is a
    /// duplicate-key error pointing at both positions.
    fn note_field(
        &self,
        seen: &mut Vec<(String, Span)>,
        field: &str,
        span: Span,
    ) -> Result<(), ParseError> {
        if let Some((_, first)) = seen.iter().find(|(f, _): &&(String, Span)| f.as_str() == field) {
            return Err(self.error_at(
                span,
                StructuralError::DuplicateKey {
                    key: field.to_string(),
                    first_line: first.line,
                    first_column: first.column,
                },
            ));
        }
        seen.push((field.to_string(), span));
        Ok(())
    }

    // ========================================================================
    // `.service`
    // ========================================================================

    fn parse_service(&mut self) -> Result<ssdl_core::Service, ParseError> {
        self.expect(TokenKind::LBrace)?;

        let mut name = None;
        let mut version = None;
        let mut scope = None;
        let mut seen = Vec::new();

        while !self.check(&TokenKind::RBrace) {
            self.guard_lex()?;
            let field_span = self.current().span;
            let field = self.expect_key()?;
            self.note_field(&mut seen, &field, field_span)?;
            self.expect(TokenKind::Colon)?;

            match field.as_str() {
                "name" => name = Some(self.expect_string()?),
                "version" => version = Some(self.parse_version()?),
                "scope" => scope = Some(self.parse_tag::<Scope>("scope")?),
                _ => {
                    return Err(self.error_at(
                        field_span,
                        StructuralError::UnknownField {
                            record: "service".to_string(),
                            field,
                        },
                    ));
                }
            }
            self.optional_comma();
        }
        self.expect(TokenKind::RBrace)?;

        Ok(ssdl_core::Service {
            name: name.ok_or_else(|| self.missing_field("service", "name"))?,
            version: version.ok_or_else(|| self.missing_field("service", "version"))?,
            scope: scope.ok_or_else(|| self.missing_field("service", "scope"))?,
        })
    }

    // ========================================================================
    // `.data`
    // ========================================================================

    fn parse_data(&mut self) -> Result<SensorData, ParseError> {
        let sensors = self.parse_mapping("the sensor list", Self::parse_sensor)?;
        Ok(SensorData { sensors })
    }

    fn parse_sensor(&mut self) -> Result<Sensor, ParseError> {
        self.expect(TokenKind::LBrace)?;

        let mut sensor_type = None;
        let mut provider = None;
        let mut uri = None;
        let mut format = None;
        let mut query = None;
        let mut seen = Vec::new();

        while !self.check(&TokenKind::RBrace) {
            self.guard_lex()?;
            let field_span = self.current().span;
            let field = self.expect_key()?;
            self.note_field(&mut seen, &field, field_span)?;
            self.expect(TokenKind::Colon)?;

            match field.as_str() {
                "type" => sensor_type = Some(self.parse_tag::<SensorType>("sensor type")?),
                "provider" => provider = Some(self.parse_tag::<Provider>("provider")?),
                "uri" => uri = Some(self.parse_uri()?),
                "format" => {
                    let props = self.parse_mapping("the sensor format", Self::parse_value)?;
                    format = Some(SensorFormat { props });
                }
                "query" => query = Some(self.parse_query()?),
                _ => {
                    return Err(self.error_at(
                        field_span,
                        StructuralError::UnknownField {
                            record: "sensor".to_string(),
                            field,
                        },
                    ));
                }
            }
            self.optional_comma();
        }
        self.expect(TokenKind::RBrace)?;

        Ok(Sensor {
            sensor_type: sensor_type.ok_or_else(|| self.missing_field("sensor", "type"))?,
            provider: provider.ok_or_else(|| self.missing_field("sensor", "provider"))?,
            uri: uri.ok_or_else(|| self.missing_field("sensor", "uri"))?,
            format: format.ok_or_else(|| self.missing_field("sensor", "format"))?,
            query,
        })
    }

    fn parse_query(&mut self) -> Result<Query, ParseError> {
        self.expect(TokenKind::LBrace)?;

        let mut entity = None;
        let mut select = None;
        let mut seen = Vec::new();

        while !self.check(&TokenKind::RBrace) {
            self.guard_lex()?;
            let field_span = self.current().span;
            let field = self.expect_key()?;
            self.note_field(&mut seen, &field, field_span)?;
            self.expect(TokenKind::Colon)?;

            match field.as_str() {
                "entity" => entity = Some(self.expect_string()?),
                "select" => {
                    select = Some(self.parse_sequence("the query selection", Self::expect_string)?)
                }
                _ => {
                    return Err(self.error_at(
                        field_span,
                        StructuralError::UnknownField {
                            record: "query".to_string(),
                            field,
                        },
                    ));
                }
            }
            self.optional_comma();
        }
        self.expect(TokenKind::RBrace)?;

        Ok(Query {
            entity: entity.ok_or_else(|| self.missing_field("query", "entity"))?,
            select: select.ok_or_else(|| self.missing_field("query", "select"))?,
        })
    }

    // ========================================================================
    // `.application`
    // ========================================================================

    fn parse_application(&mut self) -> Result<Application, ParseError> {
        self.expect(TokenKind::LBrace)?;

        let mut app_type = None;
        let mut layout = None;
        let mut roles = None;
        let mut graphs = None;
        let mut seen = Vec::new();

        while !self.check(&TokenKind::RBrace) {
            self.guard_lex()?;
            let field_span = self.current().span;
            let field = self.expect_key()?;
            self.note_field(&mut seen, &field, field_span)?;
            self.expect(TokenKind::Colon)?;

            match field.as_str() {
                "type" => app_type = Some(self.parse_tag::<AppType>("application type")?),
                "layout" => layout = Some(self.parse_tag::<AppLayout>("layout")?),
                "roles" => {
                    roles = Some(self.parse_sequence("the role list", |p| {
                        p.parse_tag::<ssdl_core::Role>("role")
                    })?)
                }
                "graphs" => {
                    graphs = Some(self.parse_mapping("the graph list", Self::parse_visualization)?)
                }
                _ => {
                    return Err(self.error_at(
                        field_span,
                        StructuralError::UnknownField {
                            record: "application".to_string(),
                            field,
                        },
                    ));
                }
            }
            self.optional_comma();
        }
        self.expect(TokenKind::RBrace)?;

        Ok(Application {
            app_type: app_type.ok_or_else(|| self.missing_field("application", "type"))?,
            layout: layout.ok_or_else(|| self.missing_field("application", "layout"))?,
            roles: roles.unwrap_or_default(),
            graphs: graphs.ok_or_else(|| self.missing_field("application", "graphs"))?,
        })
    }

    fn parse_visualization(&mut self) -> Result<Visualization, ParseError> {
        self.expect(TokenKind::LBrace)?;

        let mut vis_type = None;
        let mut format: Option<(Mapping<ValueType>, Span)> = None;
        let mut seen = Vec::new();

        while !self.check(&TokenKind::RBrace) {
            self.guard_lex()?;
            let field_span = self.current().span;
            let field = self.expect_key()?;
            self.note_field(&mut seen, &field, field_span)?;
            self.expect(TokenKind::Colon)?;

            match field.as_str() {
                "type" => vis_type = Some(self.parse_vis_type()?),
                "format" => {
                    let span = self.current().span;
                    let map = self.parse_mapping("the visualization format", Self::parse_value_type)?;
                    format = Some((map, span));
                }
                _ => {
                    return Err(self.error_at(
                        field_span,
                        StructuralError::UnknownField {
                            record: "visualization".to_string(),
                            field,
                        },
                    ));
                }
            }
            self.optional_comma();
        }
        self.expect(TokenKind::RBrace)?;

        let vis_type = vis_type.ok_or_else(|| self.missing_field("visualization", "type"))?;
        let (format, format_span) =
            format.ok_or_else(|| self.missing_field("visualization", "format"))?;

        registry::validate_format(vis_type, &format).map_err(|e| self.error_at(format_span, e))?;

        Ok(Visualization { vis_type, format })
    }

    /// Visualizations get a dedicated unknown-tag error so the message can
    /// point at the registry rather than a generic tag set.
    fn parse_vis_type(&mut self) -> Result<VisType, ParseError> {
        self.guard_lex()?;
        match &self.current().kind {
            TokenKind::Identifier(s) => match VisType::from_str(s) {
                Ok(vis) => {
                    self.advance();
                    Ok(vis)
                }
                Err(_) => Err(self.error(ValidationError::UnknownVisualization { tag: s.clone() })),
            },
            _ => Err(self.unexpected("visualization type")),
        }
    }

    // ========================================================================
    // `.deployment`
    // ========================================================================

    fn parse_deployment(&mut self) -> Result<Deployment, ParseError> {
        let envs = self.parse_mapping("the environment list", Self::parse_deployment_env)?;
        Ok(Deployment { envs })
    }

    fn parse_deployment_env(&mut self) -> Result<DeploymentEnv, ParseError> {
        self.expect(TokenKind::LBrace)?;

        let mut uri = None;
        let mut port = None;
        let mut deploy_type = None;
        let mut credentials = None;
        let mut seen = Vec::new();

        while !self.check(&TokenKind::RBrace) {
            self.guard_lex()?;
            let field_span = self.current().span;
            let field = self.expect_key()?;
            self.note_field(&mut seen, &field, field_span)?;
            self.expect(TokenKind::Colon)?;

            match field.as_str() {
                "uri" => uri = Some(self.parse_uri()?),
                "port" => port = Some(self.parse_port()?),
                "type" => {
                    deploy_type = Some(self.parse_tag::<DeploymentType>("deployment type")?)
                }
                "credentials" => {
                    credentials =
                        Some(self.parse_mapping("the credentials", Self::expect_string)?)
                }
                _ => {
                    return Err(self.error_at(
                        field_span,
                        StructuralError::UnknownField {
                            record: "environment".to_string(),
                            field,
                        },
                    ));
                }
            }
            self.optional_comma();
        }
        self.expect(TokenKind::RBrace)?;

        Ok(DeploymentEnv {
            uri: uri.ok_or_else(|| self.missing_field("environment", "uri"))?,
            port,
            deploy_type: deploy_type.ok_or_else(|| self.missing_field("environment", "type"))?,
            credentials,
        })
    }

    fn parse_port(&mut self) -> Result<u16, ParseError> {
        let (n, span) = self.expect_integer()?;
        u16::try_from(n).map_err(|_| {
            self.error_at(
                span,
                ValidationError::InvalidValue {
                    field: "port".to_string(),
                    reason: format!("{} is not a valid TCP port", n),
                },
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{ErrorKind, LexError, StructuralError, ValidationError};
    use crate::parse;
    use ssdl_core::{
        AppLayout, AppType, DeploymentType, Provider, Role, Scope, SensorType, Ssdl, Value,
        ValueType, Version, VisType,
    };

    const FULL_DOCUMENT: &str = r#"
        // Madrid air quality service.
        .service {
            name: "Air Quality Madrid"
            version: 1 0 2
            scope: Environment
        }
        .data {
            airQuality: {
                type: Device,
                provider: Fiware,
                uri: "https://streams.lab.fiware.org/v2/entities",
                format: {
                    co2: 270.95
                    humidity: 45
                    online: true
                    station: "Plaza de Espana"
                    observed: 2023-12-24T12:00:00
                    position: +40.416775-3.703790/
                },
                query: {
                    entity: "AirQualityObserved"
                    select: ["co2", "humidity"]
                }
            }
        }
        .application {
            type: WebApp,
            layout: SinglePage,
            roles: [Admin, User],
            graphs: {
                co2Trend: {
                    type: Line,
                    format: { x: Timestamp, y: Double }
                },
                stations: {
                    type: Map,
                    format: { location: Geolocation, value: Double }
                }
            }
        }
        .deployment {
            production: {
                uri: "https://deploy.example.org/api",
                port: 50055,
                type: Docker,
                credentials: { user: "admin", password: "changeme" }
            }
        }
    "#;

    fn parse_ok(source: &str) -> Ssdl {
        parse(source).unwrap_or_else(|e| panic!("parse failed: {}", e))
    }

    #[test]
    fn test_full_document() {
        let doc = parse_ok(FULL_DOCUMENT);

        assert_eq!(doc.service.name, "Air Quality Madrid");
        assert_eq!(doc.service.version, Version::new(1, 0, 2));
        assert_eq!(doc.service.scope, Scope::Environment);

        let sensor = doc.data.sensors.get("airQuality").unwrap();
        assert_eq!(sensor.sensor_type, SensorType::Device);
        assert_eq!(sensor.provider, Provider::Fiware);
        assert_eq!(sensor.uri.host_str(), Some("streams.lab.fiware.org"));
        assert_eq!(sensor.format.props.len(), 6);
        assert_eq!(
            sensor.format.props.get("co2"),
            Some(&Value::Double(270.95))
        );
        assert_eq!(
            sensor.format.props.get("humidity"),
            Some(&Value::Integer(45))
        );
        assert_eq!(
            sensor.format.props.get("online"),
            Some(&Value::Boolean(true))
        );
        let query = sensor.query.as_ref().unwrap();
        assert_eq!(query.entity, "AirQualityObserved");
        assert_eq!(query.select.len(), 2);
        assert_eq!(query.select.get(1), Some(&"humidity".to_string()));

        assert_eq!(doc.application.app_type, AppType::WebApp);
        assert_eq!(doc.application.layout, AppLayout::SinglePage);
        assert_eq!(doc.application.roles.len(), 2);
        assert_eq!(doc.application.roles.get(0), Some(&Role::Admin));
        let graph = doc.application.graphs.get("co2Trend").unwrap();
        assert_eq!(graph.vis_type, VisType::Line);
        assert_eq!(graph.format.get("x"), Some(&ValueType::Timestamp));

        let env = doc.deployment.envs.get("production").unwrap();
        assert_eq!(env.port, Some(50055));
        assert_eq!(env.deploy_type, DeploymentType::Docker);
        let creds = env.credentials.as_ref().unwrap();
        assert_eq!(creds.get("user"), Some(&"admin".to_string()));
    }

    #[test]
    fn test_sections_in_any_order() {
        let reordered = r#"
            .deployment { prod: { uri: "http://h.example", type: Docker } }
            .application { type: WebApp, layout: SinglePage, graphs: {} }
            .data {}
            .service { name: "s", version: 0 1 0, scope: Water }
        "#;
        let doc = parse_ok(reordered);
        assert_eq!(doc.service.scope, Scope::Water);
        assert!(doc.data.sensors.is_empty());
        assert!(doc.application.roles.is_empty());
        assert!(doc.deployment.envs.get("prod").unwrap().port.is_none());
    }

    #[test]
    fn test_unknown_section_rejected() {
        let err = parse(".monitoring {}").unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::Structural(StructuralError::UnknownSection { ref key }) if key == ".monitoring"
        ));
    }

    #[test]
    fn test_duplicate_section_rejected() {
        let source = r#"
            .service { name: "a", version: 1 0 0, scope: Energy }
            .service { name: "b", version: 1 0 0, scope: Energy }
        "#;
        let err = parse(source).unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::Structural(StructuralError::DuplicateSection { ref key }) if key == ".service"
        ));
    }

    #[test]
    fn test_missing_section_reported_in_order() {
        let source = r#"
            .application { type: WebApp, layout: SinglePage, graphs: {} }
            .deployment {}
        "#;
        let err = parse(source).unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::Validation(ValidationError::MissingSection { ref key }) if key == ".service"
        ));
    }

    #[test]
    fn test_missing_deployment_section() {
        let source = r#"
            .service { name: "a", version: 1 0 0, scope: Energy }
            .data {}
            .application { type: WebApp, layout: SinglePage, graphs: {} }
        "#;
        let err = parse(source).unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::Validation(ValidationError::MissingSection { ref key })
                if key == ".deployment"
        ));
    }

    #[test]
    fn test_missing_record_field() {
        let source = r#"
            .service { name: "a", scope: Energy }
            .data {}
            .application { type: WebApp, layout: SinglePage, graphs: {} }
            .deployment {}
        "#;
        let err = parse(source).unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::Validation(ValidationError::MissingField { ref record, ref field })
                if record == "service" && field == "version"
        ));
        assert_eq!(err.context.as_deref(), Some("the `.service` section"));
    }

    #[test]
    fn test_unknown_record_field() {
        let source = r#".service { name: "a", color: "blue" }"#;
        let err = parse(source).unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::Structural(StructuralError::UnknownField { ref field, .. })
                if field == "color"
        ));
    }

    #[test]
    fn test_duplicate_record_field() {
        let source = r#".service { name: "a", name: "b", version: 1 0 0, scope: Energy }"#;
        let err = parse(source).unwrap_err();
        match err.kind {
            ErrorKind::Structural(StructuralError::DuplicateKey {
                key, first_line, ..
            }) => {
                assert_eq!(key, "name");
                assert_eq!(first_line, 1);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_sensor_key() {
        let source = r#"
            .data {
                s: { type: Device, provider: Fiware, uri: "http://a.example", format: {} }
                s: { type: Device, provider: Fiware, uri: "http://b.example", format: {} }
            }
        "#;
        let err = parse(source).unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::Structural(StructuralError::DuplicateKey { ref key, .. }) if key == "s"
        ));
    }

    #[test]
    fn test_duplicate_key_wins_over_error_in_its_value() {
        // The repeated key comes before the stray character in its value.
        let source = r#"
            .data {
                s: {
                    type: Device, provider: Fiware, uri: "http://h.example",
                    format: { a: 1, a: @ }
                }
            }
        "#;
        let err = parse(source).unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::Structural(StructuralError::DuplicateKey { ref key, .. }) if key == "a"
        ));
    }

    #[test]
    fn test_unknown_tag_names_the_kind() {
        let source = r#".service { name: "a", version: 1 0 0, scope: Cooking }"#;
        let err = parse(source).unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::Validation(ValidationError::UnknownTag { ref kind, ref tag })
                if kind == "scope" && tag == "Cooking"
        ));
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        let source = r#".service { name: "a", version: 1 0 0, scope: environment }"#;
        let err = parse(source).unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::Validation(ValidationError::UnknownTag { ref tag, .. })
                if tag == "environment"
        ));
    }

    #[test]
    fn test_unknown_visualization() {
        let source = r#"
            .application {
                type: WebApp, layout: SinglePage,
                graphs: { g: { type: Sparkline, format: {} } }
            }
        "#;
        let err = parse(source).unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::Validation(ValidationError::UnknownVisualization { ref tag })
                if tag == "Sparkline"
        ));
    }

    #[test]
    fn test_format_validated_against_registry() {
        let source = r#"
            .application {
                type: WebApp, layout: SinglePage,
                graphs: { g: { type: Chart, format: { x: Double, y: String } } }
            }
        "#;
        let err = parse(source).unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::Validation(ValidationError::FormatTypeMismatch {
                expected: ValueType::Double,
                found: ValueType::Str,
                ..
            })
        ));
    }

    #[test]
    fn test_malformed_uri() {
        let source = r#"
            .data {
                s: { type: Device, provider: Fiware, uri: "not a uri", format: {} }
            }
        "#;
        let err = parse(source).unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::Lex(LexError::MalformedUri { ref literal }) if literal == "not a uri"
        ));
    }

    #[test]
    fn test_port_out_of_range() {
        let source = r#"
            .deployment {
                prod: { uri: "http://h.example", port: 70000, type: Docker }
            }
        "#;
        let err = parse(source).unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::Validation(ValidationError::InvalidValue { ref field, .. })
                if field == "port"
        ));
    }

    #[test]
    fn test_negative_version_component() {
        let source = r#".service { name: "a", version: 1 -1 0, scope: Energy }"#;
        let err = parse(source).unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::Validation(ValidationError::InvalidValue { ref field, .. })
                if field == "version"
        ));
    }

    #[test]
    fn test_almost_boolean_in_value_position() {
        let source = r#"
            .data {
                s: {
                    type: Device, provider: Fiware, uri: "http://h.example",
                    format: { online: True }
                }
            }
        "#;
        let err = parse(source).unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::Lex(LexError::BadBoolean { ref found }) if found == "True"
        ));
        assert_eq!(
            err.context.as_deref(),
            Some("entry `online` of the sensor format")
        );
    }

    #[test]
    fn test_commas_are_optional() {
        let with = r#".service { name: "a", version: 1 0 0, scope: Energy } .data {} .application { type: WebApp, layout: SinglePage, graphs: {} } .deployment {}"#;
        let without = r#".service { name: "a" version: 1 0 0 scope: Energy } .data {} .application { type: WebApp layout: SinglePage graphs: {} } .deployment {}"#;
        assert_eq!(parse_ok(with), parse_ok(without));
    }

    #[test]
    fn test_earlier_error_wins_over_later_lex_error() {
        // The stray identifier in `.service` comes before the bad timestamp
        // in `.data`; fail-fast means the structural error is the one
        // reported.
        let source = r#"
            .service { name "a" }
            .data { s: { format: { t: 2023-13-99T00:00:00 } } }
        "#;
        let err = parse(source).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Structural(_)));
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_earlier_lex_error_wins_over_later_structural_error() {
        // The overflowing patch component in `.service` comes before the
        // stray brace in `.deployment`.
        let source = r#"
            .service { name: "a", version: 1 0 99999999999999999999, scope: Energy }
            .data {}
            .application { type: WebApp, layout: SinglePage, graphs: {} }
            .deployment { { }
        "#;
        let err = parse(source).unwrap_err();
        assert!(matches!(
            err.kind,
            ErrorKind::Lex(LexError::IntegerOverflow { .. })
        ));
        assert_eq!(err.line, 2);
    }

    #[test]
    fn test_error_position_and_snippet() {
        let err = parse(".service { name: 42 }").unwrap_err();
        assert_eq!(err.line, 1);
        assert_eq!(err.column, 18);
        assert!(err.snippet.starts_with("42"));
    }

    #[test]
    fn test_trailing_garbage_rejected() {
        let source = r#"
            .service { name: "a", version: 1 0 0, scope: Energy }
            .data {} .application { type: WebApp, layout: SinglePage, graphs: {} }
            .deployment {} }
        "#;
        let err = parse(source).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Structural(_)));
    }

    #[test]
    fn test_serde_round_trip() {
        let doc = parse_ok(FULL_DOCUMENT);
        let json = serde_json::to_string(&doc).unwrap();
        let back: Ssdl = serde_json::from_str(&json).unwrap();
        assert_eq!(doc, back);
    }
}
