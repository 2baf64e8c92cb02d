use secretary::intake::replies::{CATEGORIES_OFFLINE, GENERIC_ERROR, PENDING_CANCELLED};
use secretary::memory::{PendingAction, PendingActionStore};
use serde_json::json;

use super::support::{FakeTaxonomy, Harness, RecordingSink, ScriptedProvider};

#[tokio::test]
async fn blank_message_gets_no_reply() {
    let harness = Harness::with_model(ScriptedProvider::new());
    assert!(harness.intake.handle_message("   \n").await.is_none());
    assert!(harness.provider.calls().is_empty());
}

#[tokio::test]
async fn plain_conversation_is_answered_by_the_model() {
    let harness = Harness::with_model(
        ScriptedProvider::new()
            .reply(r#"{"resposta": "Oi! Em que posso ajudar?", "acao": "responder", "dados": null}"#),
    );

    let reply = harness.intake.handle_message("oi").await.unwrap();

    assert_eq!(reply, "Oi! Em que posso ajudar?");
    assert_eq!(harness.taxonomy.fetches(), 0);
    assert!(harness.sink.documents().is_empty());
}

#[tokio::test]
async fn negative_reply_cancels_pending_action() {
    let harness = Harness::with_model(ScriptedProvider::new());
    harness
        .memory
        .set(PendingAction(json!({"acao": "criar_tarefa_planejamento"})))
        .await
        .unwrap();

    let reply = harness.intake.handle_message("Não").await.unwrap();

    assert_eq!(reply, PENDING_CANCELLED);
    assert!(harness.memory.get().await.unwrap().is_none());
    assert!(harness.provider.calls().is_empty());
}

#[tokio::test]
async fn negative_reply_without_pending_goes_to_the_model() {
    let harness = Harness::with_model(ScriptedProvider::new().reply("{\"resposta\": \"Tudo bem.\"}"));

    let reply = harness.intake.handle_message("não").await.unwrap();

    assert_eq!(reply, "Tudo bem.");
    assert_eq!(harness.provider.calls().len(), 1);
}

#[tokio::test]
async fn category_question_lists_taxonomy_without_the_model() {
    let harness = Harness::with_model(ScriptedProvider::new());

    let reply = harness
        .intake
        .handle_message("quais são minhas categorias?")
        .await
        .unwrap();

    assert_eq!(
        reply,
        "Suas categorias são:\nIdeias - Tecnologia\nLeitura - Geral - Inbox\nPessoal - Inbox"
    );
    assert!(harness.provider.calls().is_empty());
}

#[tokio::test]
async fn category_question_with_backend_offline() {
    let harness = Harness::new(
        ScriptedProvider::new(),
        FakeTaxonomy::offline(),
        RecordingSink::default(),
    );

    let reply = harness
        .intake
        .handle_message("quais interesses e áreas existem")
        .await
        .unwrap();

    assert_eq!(reply, CATEGORIES_OFFLINE);
}

#[tokio::test]
async fn model_failure_yields_generic_error() {
    let harness = Harness::with_model(ScriptedProvider::new().fail("503 from upstream"));

    let reply = harness.intake.handle_message("oi").await.unwrap();

    assert_eq!(reply, GENERIC_ERROR);
}

#[tokio::test]
async fn prose_answer_is_relayed_verbatim() {
    let harness =
        Harness::with_model(ScriptedProvider::new().reply("Claro, posso ajudar com isso."));

    let reply = harness.intake.handle_message("oi").await.unwrap();

    assert_eq!(reply, "Claro, posso ajudar com isso.");
}

#[tokio::test]
async fn empty_model_output_uses_fallback() {
    let harness = Harness::with_model(ScriptedProvider::new().reply(""));

    let reply = harness.intake.handle_message("oi").await.unwrap();

    assert_eq!(reply, "Recebi sua mensagem.");
}
