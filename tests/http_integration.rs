//! Integration tests for the vCHS client using wiremock
//!
//! These tests run the real HTTP transport against mocked endpoints and
//! check status handling, content negotiation and sample output.

use reqwest::StatusCode;
use serde_json::json;
use std::time::Duration;
use vchs_samples::samples::metering_and_billing::{self, MeteringAndBillingOptions};
use vchs_samples::samples::users::{self, UsersOptions};
use vchs_samples::samples::vdc_vm_ids::{self, VdcVmIdsOptions};
use vchs_samples::samples::vdcs_and_templates::{self, VdcsAndTemplatesOptions};
use vchs_samples::vchs::auth::{Credentials, SessionToken};
use vchs_samples::vchs::iam::{self, User};
use vchs_samples::vchs::{metering, service_controller, ApiClient, VchsError};
use wiremock::matchers::{basic_auth, bearer_token, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USERNAME: &str = "me@example.com";
const PASSWORD: &str = "secret";
const VCLOUD_XML: &str = "application/vnd.vmware.vcloud+xml;version=5.7";

fn client() -> ApiClient {
    ApiClient::new("5.7", false).expect("client should build")
}

fn credentials(server: &MockServer) -> Credentials {
    Credentials::new(&server.uri(), USERNAME, PASSWORD)
}

async fn mount_login(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/api/iam/login"))
        .and(basic_auth(USERNAME, PASSWORD))
        .respond_with(ResponseTemplate::new(201).insert_header("vchs-authorization", token))
        .mount(server)
        .await;
}

fn xml(status: u16, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_raw(body.to_string(), VCLOUD_XML)
}

mod login_tests {
    use super::*;

    #[tokio::test]
    async fn test_login_returns_session_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/iam/login"))
            .and(basic_auth(USERNAME, PASSWORD))
            .and(header("accept", "application/json;version=5.7"))
            .respond_with(ResponseTemplate::new(201).insert_header("vchs-authorization", "tok123"))
            .expect(1)
            .mount(&server)
            .await;

        let token = iam::login(&client(), &credentials(&server)).await.unwrap();
        assert_eq!(token.as_str(), "tok123");
    }

    #[tokio::test]
    async fn test_login_rejected_is_auth_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/iam/login"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = iam::login(&client(), &credentials(&server)).await.unwrap_err();
        assert!(matches!(
            err,
            VchsError::AuthFailure {
                status: StatusCode::UNAUTHORIZED
            }
        ));
    }

    #[tokio::test]
    async fn test_login_ok_status_is_still_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/iam/login"))
            .respond_with(ResponseTemplate::new(200).insert_header("vchs-authorization", "tok"))
            .mount(&server)
            .await;

        let err = iam::login(&client(), &credentials(&server)).await.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::OK));
    }

    #[tokio::test]
    async fn test_login_without_token_header() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/iam/login"))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;

        let err = iam::login(&client(), &credentials(&server)).await.unwrap_err();
        assert!(matches!(err, VchsError::MissingHeader("vchs-authorization")));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let creds = Credentials::new("http://127.0.0.1:1", USERNAME, PASSWORD);
        let err = iam::login(&client(), &creds).await.unwrap_err();
        assert!(matches!(err, VchsError::Transport(_)));
    }
}

mod service_controller_tests {
    use super::*;

    #[tokio::test]
    async fn test_json_instance_list() {
        let server = MockServer::start().await;
        let attributes = json!({
            "orgName": "org-1",
            "sessionUri": "https://c/api/sessions",
        })
        .to_string();
        Mock::given(method("GET"))
            .and(path("/api/sc/instances"))
            .and(bearer_token("tok123"))
            .and(header("accept", "application/xml;version=5.7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "instances": [
                    {
                        "id": "i-1",
                        "name": "Virtual Private Cloud OnDemand",
                        "region": "us-california-1-3.vchs.vmware.com",
                        "apiUrl": "https://c/api/compute/api",
                        "instanceAttributes": attributes,
                    },
                    {"id": "i-2", "name": "Data Protection", "region": "uk-slough-1-6.vchs.vmware.com"}
                ]
            })))
            .mount(&server)
            .await;

        let instances =
            service_controller::list_instances(&client(), &server.uri(), &SessionToken::new("tok123"))
                .await
                .unwrap();

        assert_eq!(instances.len(), 2);
        assert!(instances[0].is_compute());
        assert!(!instances[1].is_compute());
        assert_eq!(instances[0].attributes().unwrap().org_name, "org-1");
        assert_eq!(instances[1].region, "uk-slough-1-6.vchs.vmware.com");
    }

    #[tokio::test]
    async fn test_minimal_instance_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/sc/instances"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(r#"{"instances":[{"id":"i1","name":"svc"}]}"#, "application/json"),
            )
            .mount(&server)
            .await;

        let instances =
            service_controller::list_instances(&client(), &server.uri(), &SessionToken::new("t"))
                .await
                .unwrap();
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].id, "i1");
        assert_eq!(instances[0].name, "svc");
    }

    #[tokio::test]
    async fn test_list_failure_is_unexpected_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/sc/plans"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = service_controller::list_plans(&client(), &server.uri(), &SessionToken::new("t"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            VchsError::UnexpectedStatus {
                status: StatusCode::UNAUTHORIZED,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_delete_instance_returns_raw_status() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/sc/instances/i-1"))
            .respond_with(ResponseTemplate::new(202))
            .mount(&server)
            .await;

        let status = service_controller::delete_instance(
            &client(),
            &server.uri(),
            &SessionToken::new("t"),
            "i-1",
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::ACCEPTED);
    }
}

mod iam_tests {
    use super::*;

    #[tokio::test]
    async fn test_update_user_forbidden_leaves_user_alone() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/iam/Users/u-1"))
            .and(bearer_token("tok123"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "code": "403",
                "message": "Not allowed"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let user = User {
            id: Some("u-1".into()),
            user_name: "jdoe".into(),
            given_name: Some("Jane".into()),
            ..Default::default()
        };
        let before = user.clone();

        let status = iam::update_user(&client(), &server.uri(), &SessionToken::new("tok123"), &user)
            .await
            .unwrap();

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(user, before);
    }

    #[tokio::test]
    async fn test_update_user_no_content() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/iam/Users/u-1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let user = User {
            id: Some("u-1".into()),
            user_name: "jdoe".into(),
            ..Default::default()
        };
        let status = iam::update_user(&client(), &server.uri(), &SessionToken::new("t"), &user)
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_users_sample_prints_error_body() {
        let server = MockServer::start().await;
        mount_login(&server, "tok").await;
        Mock::given(method("GET"))
            .and(path("/api/iam/Users"))
            .and(query_param("self", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "users": [{"userName": "jdoe", "email": "jdoe@example.com"}]
            })))
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/iam/Users"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "code": "ACCESS_DENIED",
                "message": "Account admin role required"
            })))
            .mount(&server)
            .await;

        let mut out = Vec::new();
        users::run(&client(), &credentials(&server), &UsersOptions::default(), &mut out)
            .await
            .unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Logged in as jdoe (jdoe@example.com)"));
        assert!(text.contains("ERROR CODE : ACCESS_DENIED"));
        assert!(text.contains("MESSAGE    : Account admin role required"));
    }
}

mod compute_tests {
    use super::*;

    const REGION: &str = "us-california-1-3.vchs.vmware.com";

    /// One compute instance, one org, VDC-A with two VMs and an empty VDC-B
    async fn mount_compute(server: &MockServer, vapp_delay: Duration) {
        let base = server.uri();
        mount_login(server, "tok123").await;

        let attributes = json!({
            "orgName": "org1",
            "sessionUri": format!("{}/api/compute/sessions", base),
        })
        .to_string();
        Mock::given(method("GET"))
            .and(path("/api/sc/instances"))
            .and(bearer_token("tok123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "instances": [{
                    "id": "i-1",
                    "name": "Virtual Private Cloud OnDemand",
                    "region": REGION,
                    "apiUrl": format!("{}/api/compute", base),
                    "instanceAttributes": attributes,
                }]
            })))
            .mount(server)
            .await;

        Mock::given(method("POST"))
            .and(path("/api/compute/sessions"))
            .and(basic_auth(format!("{}@org1", USERNAME), PASSWORD))
            .respond_with(xml(200, "<Session/>").insert_header("x-vcloud-authorization", "vcd"))
            .mount(server)
            .await;

        let routes = [
            (
                "/api/compute/org",
                format!(r#"<OrgList><Org href="{base}/api/compute/org/1" name="org1"/></OrgList>"#),
            ),
            (
                "/api/compute/org/1",
                format!(
                    r#"<Org name="org1" href="{base}/api/compute/org/1">
                        <Link rel="down" href="{base}/api/compute/vdc/a" type="application/vnd.vmware.vcloud.vdc+xml"/>
                        <Link rel="down" href="{base}/api/compute/catalog/c" type="application/vnd.vmware.vcloud.catalog+xml"/>
                        <Link rel="down" href="{base}/api/compute/vdc/b" type="application/vnd.vmware.vcloud.vdc+xml"/>
                    </Org>"#
                ),
            ),
            (
                "/api/compute/vdc/a",
                format!(
                    r#"<Vdc name="VDC-A" id="urn:vcloud:vdc:aaa" href="{base}/api/compute/vdc/a">
                        <ResourceEntities>
                            <ResourceEntity href="{base}/api/compute/vApp/1" name="app" type="application/vnd.vmware.vcloud.vApp+xml"/>
                        </ResourceEntities>
                    </Vdc>"#
                ),
            ),
            (
                "/api/compute/vdc/b",
                format!(r#"<Vdc name="VDC-B" id="urn:vcloud:vdc:bbb" href="{base}/api/compute/vdc/b"/>"#),
            ),
        ];
        for (route, body) in routes {
            Mock::given(method("GET"))
                .and(path(route))
                .and(header("x-vcloud-authorization", "vcd"))
                .respond_with(xml(200, &body))
                .mount(server)
                .await;
        }

        let vapp = r#"<VApp name="app" href="x">
            <Children>
                <Vm name="vm-1" id="urn:vcloud:vm:111" href="x"/>
                <Vm name="vm-2" id="urn:vcloud:vm:222" href="y"/>
            </Children>
        </VApp>"#;
        Mock::given(method("GET"))
            .and(path("/api/compute/vApp/1"))
            .respond_with(xml(200, vapp).set_delay(vapp_delay))
            .mount(server)
            .await;
    }

    fn expected_output() -> String {
        format!(
            "\nConnecting to vCHS...Success\n\n\
             Logging in to compute instance - region: {REGION}...Success.\n\n\
             VDC VDC-A  ID: aaa\n\
             VM vm-1  ID: 111\n\
             VM vm-2  ID: 222\n\
             VDC VDC-B  ID: bbb\n\
             No VMs found.\n\n"
        )
    }

    #[tokio::test]
    async fn test_vdc_vm_ids_sequential_order() {
        let server = MockServer::start().await;
        mount_compute(&server, Duration::ZERO).await;

        let mut out = Vec::new();
        vdc_vm_ids::run(&client(), &credentials(&server), &VdcVmIdsOptions::default(), &mut out)
            .await
            .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), expected_output());
    }

    #[tokio::test]
    async fn test_vdc_vm_ids_parallel_keeps_order() {
        let server = MockServer::start().await;
        mount_compute(&server, Duration::from_millis(200)).await;

        let mut out = Vec::new();
        let options = VdcVmIdsOptions { parallel: true };
        vdc_vm_ids::run(&client(), &credentials(&server), &options, &mut out)
            .await
            .unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), expected_output());
    }

    #[tokio::test]
    async fn test_vdc_vm_ids_compute_login_failure() {
        let server = MockServer::start().await;
        mount_login(&server, "tok123").await;
        let attributes = json!({
            "orgName": "org1",
            "sessionUri": format!("{}/api/compute/sessions", server.uri()),
        })
        .to_string();
        Mock::given(method("GET"))
            .and(path("/api/sc/instances"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "instances": [{
                    "id": "i-1",
                    "name": "Virtual Private Cloud OnDemand",
                    "region": REGION,
                    "apiUrl": format!("{}/api/compute", server.uri()),
                    "instanceAttributes": attributes,
                }]
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/compute/sessions"))
            .respond_with(xml(401, "<Error/>"))
            .mount(&server)
            .await;

        let mut out = Vec::new();
        vdc_vm_ids::run(&client(), &credentials(&server), &VdcVmIdsOptions::default(), &mut out)
            .await
            .unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Could not log in to compute with credentials"));
        assert!(!text.contains("VDC "));
    }

    #[tokio::test]
    async fn test_sample_stops_when_login_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/iam/login"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let mut out = Vec::new();
        let result = vdc_vm_ids::run(
            &client(),
            &credentials(&server),
            &VdcVmIdsOptions::default(),
            &mut out,
        )
        .await;

        assert!(result.is_err());
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Connecting to vCHS...Failed"));
    }
}

mod metering_tests {
    use super::*;

    const USAGE_XML: &str = "<BillableUsage>\
        <currency>USD</currency>\
        <startTime>2014-05-01T00:00:00Z</startTime>\
        <entity><name>vdc-1</name><entityType>L1</entityType>\
          <billableList>\
            <billable><name>CPU</name><cost>12.50</cost><rate>0.013</rate><usage>961</usage><unit>GHz-hours</unit><currency>USD</currency></billable>\
          </billableList>\
        </entity>\
        </BillableUsage>";

    #[tokio::test]
    async fn test_billable_usage_from_xml() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/metering/service-instance/s-1/billable-usage"))
            .and(header(
                "accept",
                "application/xml;class=vnd.vmware.vchs.metering.billableUsage;version=5.7",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                USAGE_XML,
                "application/xml;class=vnd.vmware.vchs.metering.billableUsage;version=5.7",
            ))
            .mount(&server)
            .await;

        let report = metering::billable_usage(&client(), &server.uri(), &SessionToken::new("t"), "s-1")
            .await
            .unwrap();

        assert_eq!(report.currency.as_deref(), Some("USD"));
        assert_eq!(
            report.start_time.map(|t| t.to_string()).as_deref(),
            Some("2014-05-01T00:00:00Z")
        );
        let billables = report.entity[0].billables();
        assert_eq!(billables[0].name, "CPU");
        assert_eq!(billables[0].cost.as_ref().map(|c| c.0.as_str()), Some("12.50"));
    }

    #[tokio::test]
    async fn test_metering_sample_reports_and_continues() {
        let server = MockServer::start().await;
        mount_login(&server, "tok").await;
        Mock::given(method("GET"))
            .and(path("/api/billing/service-instance/s-1/l1/l-1/billed-usage"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/metering/service-instance/s-1/billable-usage"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(USAGE_XML, "application/xml"))
            .mount(&server)
            .await;

        let options = MeteringAndBillingOptions {
            service_instance_id: "s-1".into(),
            l1_id: "l-1".into(),
            ..Default::default()
        };
        let mut out = Vec::new();
        metering_and_billing::run(&client(), &credentials(&server), &options, &mut out)
            .await
            .unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Billed usage for L1: Resource not found."));
        assert!(text.lines().any(|l| l.starts_with("vdc-1") && l.ends_with("L1")));
        assert!(text
            .lines()
            .any(|l| l.starts_with("CPU") && l.contains("12.50") && l.ends_with("USD")));
    }
}

mod vdcs_and_templates_tests {
    use super::*;

    const REGION: &str = "us-virginia-1-4.vchs.vmware.com";

    /// Compute instances in two regions; the matching one has VDC-A (one
    /// template, two networks) and VDC-B
    async fn mount_compute(server: &MockServer) {
        let base = server.uri();
        mount_login(server, "tok").await;

        let attributes = |api: &str| {
            json!({
                "orgName": "org1",
                "sessionUri": format!("{}/{}/sessions", base, api),
            })
            .to_string()
        };
        Mock::given(method("GET"))
            .and(path("/api/sc/instances"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "instances": [
                    {
                        "id": "i-0",
                        "name": "Virtual Private Cloud OnDemand",
                        "region": "us-california-1-3.vchs.vmware.com",
                        "apiUrl": format!("{}/api/elsewhere", base),
                        "instanceAttributes": attributes("api/elsewhere"),
                    },
                    {
                        "id": "i-1",
                        "name": "Virtual Private Cloud OnDemand",
                        "region": REGION.to_uppercase(),
                        "apiUrl": format!("{}/api/compute", base),
                        "instanceAttributes": attributes("api/compute"),
                    }
                ]
            })))
            .mount(server)
            .await;

        Mock::given(method("POST"))
            .and(path("/api/compute/sessions"))
            .and(basic_auth(format!("{}@org1", USERNAME), PASSWORD))
            .respond_with(xml(200, "<Session/>").insert_header("x-vcloud-authorization", "vcd"))
            .mount(server)
            .await;

        let routes = [
            (
                "/api/compute/org",
                format!(r#"<OrgList><Org href="{base}/api/compute/org/1" name="org1"/></OrgList>"#),
            ),
            (
                "/api/compute/org/1",
                format!(
                    r#"<Org name="org1" href="{base}/api/compute/org/1">
                        <Link rel="down" href="{base}/api/compute/vdc/a" type="application/vnd.vmware.vcloud.vdc+xml"/>
                        <Link rel="down" href="{base}/api/compute/vdc/b" type="application/vnd.vmware.vcloud.vdc+xml"/>
                    </Org>"#
                ),
            ),
            (
                "/api/compute/vdc/a",
                format!(
                    r#"<Vdc name="VDC-A" id="urn:vcloud:vdc:aaa" href="{base}/api/compute/vdc/a">
                        <AvailableNetworks>
                            <Network href="{base}/api/compute/network/1" name="default-routed" type="application/vnd.vmware.vcloud.network+xml"/>
                            <Network href="{base}/api/compute/network/2" name="isolated" type="application/vnd.vmware.vcloud.network+xml"/>
                        </AvailableNetworks>
                    </Vdc>"#
                ),
            ),
            (
                "/api/compute/vdc/b",
                format!(r#"<Vdc name="VDC-B" id="urn:vcloud:vdc:bbb" href="{base}/api/compute/vdc/b"/>"#),
            ),
            (
                "/api/compute/vdcTemplates",
                format!(
                    r#"<VdcTemplateList>
                        <VdcTemplate href="{base}/api/compute/vdcTemplate/1" name="Standard" type="application/vnd.vmware.admin.vdcTemplate+xml"/>
                        <VdcTemplate href="{base}/api/compute/other/2" name="NotATemplate" type="application/vnd.vmware.vcloud.other+xml"/>
                    </VdcTemplateList>"#
                ),
            ),
        ];
        for (route, body) in routes {
            Mock::given(method("GET"))
                .and(path(route))
                .and(header("x-vcloud-authorization", "vcd"))
                .respond_with(xml(200, &body))
                .mount(server)
                .await;
        }

        for (vdc, body) in [
            (
                "a",
                r#"<QueryResultRecords>
                    <VAppTemplateRecord name="CentOS64-64BIT" description="CentOS 6.4" href="x" vdc="a"/>
                    <VAppTemplateRecord name="W2K12-STD-64BIT" href="y" vdc="a"/>
                </QueryResultRecords>"#,
            ),
            ("b", "<QueryResultRecords/>"),
        ] {
            Mock::given(method("GET"))
                .and(path("/api/compute/query"))
                .and(query_param("type", "vAppTemplate"))
                .and(query_param("format", "records"))
                .and(query_param("filter", format!("vdc=={}/api/compute/vdc/{}", base, vdc)))
                .respond_with(xml(200, body))
                .mount(server)
                .await;
        }
    }

    #[tokio::test]
    async fn test_vdcs_and_templates_by_name() {
        let server = MockServer::start().await;
        mount_compute(&server).await;

        let options = VdcsAndTemplatesOptions {
            region: REGION.into(),
            vdc_name: Some("vdc-a".into()),
            template_name: Some("centos64-64bit".into()),
            vdc_template_name: Some("Standard".into()),
            ..Default::default()
        };
        let mut out = Vec::new();
        vdcs_and_templates::run(&client(), &credentials(&server), &options, &mut out)
            .await
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        let base = server.uri();

        assert!(text.contains("Logging in to compute...Success.\n\n"));
        assert!(text.contains("Found matching VDC VDC-A\n"));
        assert!(!text.contains("VDC-B"));
        assert!(text.contains(
            "Templates for VDC VDC-A:\nCentOS64-64BIT  CentOS 6.4\nW2K12-STD-64BIT  \n"
        ));
        assert!(text.contains(
            "Available networks:\n\
             NAME: default-routed  application/vnd.vmware.vcloud.network+xml\n\
             NAME: isolated  application/vnd.vmware.vcloud.network+xml\n"
        ));
        assert!(text.contains("Found matching template CentOS64-64BIT\n"));
        assert!(text.contains("VDC templates:\nStandard\n"));
        assert!(!text.contains("NotATemplate"));
        assert!(text.ends_with(&format!(
            "Found matching VDC template Standard ({}/api/compute/vdcTemplate/1)\n",
            base
        )));
    }

    #[tokio::test]
    async fn test_vdcs_and_templates_by_id_without_template_match() {
        let server = MockServer::start().await;
        mount_compute(&server).await;

        let options = VdcsAndTemplatesOptions {
            region: REGION.into(),
            vdc_id: Some("URN:VCLOUD:VDC:BBB".into()),
            template_name: Some("CentOS64-64BIT".into()),
            vdc_template_name: Some("Large".into()),
            ..Default::default()
        };
        let mut out = Vec::new();
        vdcs_and_templates::run(&client(), &credentials(&server), &options, &mut out)
            .await
            .unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Found matching VDC VDC-B\nTemplates for VDC VDC-B:\n"));
        assert!(!text.contains("Available networks:"));
        assert!(text.contains("No template named CentOS64-64BIT\n"));
        assert!(text.ends_with("No VDC template named Large\n"));
    }

    #[tokio::test]
    async fn test_vdcs_and_templates_unknown_region() {
        let server = MockServer::start().await;
        mount_compute(&server).await;

        let options = VdcsAndTemplatesOptions {
            region: "eu-london-1.vchs.vmware.com".into(),
            ..Default::default()
        };
        let mut out = Vec::new();
        vdcs_and_templates::run(&client(), &credentials(&server), &options, &mut out)
            .await
            .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\nConnecting to vCHS...Success\n\nNo compute instance found\n"
        );
    }
}
