use serde_json::json;

use super::support::{FakeTaxonomy, Harness, RecordingSink, ScriptedProvider};

#[tokio::test]
async fn task_is_created_with_defaults() {
    let harness = Harness::with_model(ScriptedProvider::new().reply_json(&json!({
        "resposta": "Vou criar a tarefa.",
        "acao": "criar_tarefa_planejamento",
        "dados": {"titulo": "Enviar proposta"}
    })));

    let reply = harness
        .intake
        .handle_message("cria uma tarefa: enviar proposta ao cliente")
        .await
        .unwrap();

    assert_eq!(
        reply,
        "Vou criar a tarefa.\n\n✅ Tarefa criada no planejamento empresarial."
    );
    let cards = harness.sink.cards();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].title, "Enviar proposta");
    assert_eq!(cards[0].status, "todo");
    assert_eq!(cards[0].priority, "medium");
    assert_eq!(harness.provider.calls().len(), 1);
    assert_eq!(harness.taxonomy.fetches(), 0);
}

#[tokio::test]
async fn task_title_falls_back_to_placeholder() {
    let harness = Harness::with_model(ScriptedProvider::new().reply_json(&json!({
        "resposta": "Criando.",
        "acao": "criar_tarefa_planejamento",
        "dados": {"priority": "high", "status": "doing"}
    })));

    harness.intake.handle_message("tarefa urgente").await.unwrap();

    let card = &harness.sink.cards()[0];
    assert_eq!(card.title, "Tarefa");
    assert_eq!(card.status, "doing");
    assert_eq!(card.priority, "high");
}

#[tokio::test]
async fn task_without_data_is_only_a_reply() {
    let harness = Harness::with_model(ScriptedProvider::new().reply_json(&json!({
        "resposta": "Qual tarefa?",
        "acao": "criar_tarefa_planejamento",
        "dados": null
    })));

    let reply = harness.intake.handle_message("cria uma tarefa").await.unwrap();

    assert_eq!(reply, "Qual tarefa?");
    assert!(harness.sink.cards().is_empty());
}

#[tokio::test]
async fn task_persistence_failure_appends_warning() {
    let harness = Harness::new(
        ScriptedProvider::new().reply_json(&json!({
            "resposta": "Vou criar.",
            "acao": "criar_tarefa_planejamento",
            "dados": {"title": "Revisar contrato"}
        })),
        FakeTaxonomy::standard(),
        RecordingSink::failing(),
    );

    let reply = harness.intake.handle_message("tarefa: revisar contrato").await.unwrap();

    assert_eq!(
        reply,
        "Vou criar.\n\n⚠️ Não foi possível gravar no Obsidian (verifique servidor)."
    );
}
