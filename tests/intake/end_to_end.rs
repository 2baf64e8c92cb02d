use secretary::app::build_intake;
use secretary::config::{BackendConfig, Config, LlmConfig, MemoryConfig};
use secretary::intake::replies::CATEGORIES_OFFLINE;
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn completion(content: &Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{"message": {"role": "assistant", "content": content.to_string()}}]
    }))
}

fn config_for(llm: &MockServer, backend: &MockServer, tmp: &TempDir) -> Config {
    Config {
        llm: LlmConfig {
            api_key: Some("or-test-key".into()),
            base_url: format!("{}/chat/completions", llm.uri()),
            timeout_secs: 5,
            ..LlmConfig::default()
        },
        backend: BackendConfig {
            base_url: backend.uri(),
            timeout_secs: 5,
        },
        memory: MemoryConfig {
            path: Some(tmp.path().join("memoria.json")),
        },
        ..Config::default()
    }
}

async fn mount_taxonomy(backend: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/interests"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "i1", "name": "Leitura"},
            {"id": "i2", "name": "Pessoal"}
        ])))
        .mount(backend)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/areas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "a1", "name": "Inbox", "interestId": "i1"},
            {"id": "a2", "name": "Geral", "interestId": "i1"},
            {"id": "a3", "name": "Inbox", "interestId": "i2"}
        ])))
        .mount(backend)
        .await;
}

#[tokio::test]
async fn save_request_reaches_the_backend() {
    let llm = MockServer::start().await;
    let backend = MockServer::start().await;
    let tmp = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("TEXTO ORIGINAL"))
        .respond_with(completion(&json!({
            "titulo": "Duna",
            "descricao": "Ler Duna com calma.",
            "corpo": "Ler Duna, de Frank Herbert."
        })))
        .with_priority(1)
        .expect(1)
        .mount(&llm)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer or-test-key"))
        .respond_with(completion(&json!({
            "resposta": "Anotado em Leitura > Inbox.",
            "acao": "salvar_ideia",
            "dados": {
                "titulo": "duna",
                "resumo": "ler duna de frank herbert",
                "tags": ["livros"],
                "interest": "Leitura",
                "area": "Inbox"
            }
        })))
        .expect(1)
        .mount(&llm)
        .await;

    mount_taxonomy(&backend).await;
    Mock::given(method("POST"))
        .and(path("/api/documents"))
        .and(body_partial_json(json!({
            "title": "Duna",
            "content": "Ler Duna com calma.\n\nLer Duna, de Frank Herbert.",
            "interest": "Leitura",
            "area": "Inbox",
            "tags": ["livros"],
            "cover": "",
            "relations": []
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "d1"})))
        .expect(1)
        .mount(&backend)
        .await;

    let config = config_for(&llm, &backend, &tmp);
    let intake = build_intake(&config);

    let reply = intake
        .handle_message("salvar ideia: ler duna de frank herbert")
        .await
        .unwrap();

    assert!(reply.starts_with("Anotado em Leitura > Inbox.\n\n✅ Ideia salva."));
    assert!(reply.contains("• Título: Duna"));
    assert!(reply.ends_with("• Resumo: Ler Duna com calma."));

    // First contact with the memory file writes the default profile.
    let stored: Value =
        serde_json::from_str(&std::fs::read_to_string(tmp.path().join("memoria.json")).unwrap())
            .unwrap();
    assert_eq!(stored["usuario"]["perfil"], "programador");
}

#[tokio::test]
async fn backend_rejection_is_reported_in_reply() {
    let llm = MockServer::start().await;
    let backend = MockServer::start().await;
    let tmp = TempDir::new().unwrap();

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(completion(&json!({
            "resposta": "Criando a tarefa.",
            "acao": "criar_tarefa_planejamento",
            "dados": {"titulo": "Enviar proposta"}
        })))
        .mount(&llm)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/professional-planning/cards"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&backend)
        .await;

    let intake = build_intake(&config_for(&llm, &backend, &tmp));
    let reply = intake.handle_message("tarefa: enviar proposta").await.unwrap();

    assert_eq!(
        reply,
        "Criando a tarefa.\n\n⚠️ Não foi possível gravar no Obsidian (verifique servidor)."
    );
}

#[tokio::test]
async fn category_listing_over_http() {
    let llm = MockServer::start().await;
    let backend = MockServer::start().await;
    let tmp = TempDir::new().unwrap();
    mount_taxonomy(&backend).await;

    let intake = build_intake(&config_for(&llm, &backend, &tmp));

    assert_eq!(
        intake.list_categories().await,
        "Suas categorias são:\nLeitura - Geral - Inbox\nPessoal - Inbox"
    );
}

#[tokio::test]
async fn category_listing_with_backend_down() {
    let llm = MockServer::start().await;
    let backend = MockServer::start().await;
    let tmp = TempDir::new().unwrap();
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&backend)
        .await;

    let intake = build_intake(&config_for(&llm, &backend, &tmp));

    assert_eq!(intake.list_categories().await, CATEGORIES_OFFLINE);
}
