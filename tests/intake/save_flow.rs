use secretary::intake::replies::{MISSING_CATEGORY, UNRESOLVABLE_CATEGORY};
use secretary::intake::{IdeaDraft, SaveOutcome};
use serde_json::json;

use super::support::{
    FakeTaxonomy, Harness, RecordingSink, ScriptedProvider, refinement, save_turn,
};

const MESSAGE: &str = "salvar ideia: ler Duna devagar";

#[tokio::test]
async fn refined_idea_is_saved_under_resolved_category() {
    let harness = Harness::with_model(
        ScriptedProvider::new()
            .reply_json(&save_turn("Anotado.", "duna", "ler duna devagar", "leitura", "inb"))
            .reply_json(&refinement(
                "Duna",
                "Ler Duna com calma.",
                "Ler Duna devagar.",
            )),
    );

    let reply = harness.intake.handle_message(MESSAGE).await.unwrap();

    let documents = harness.sink.documents();
    assert_eq!(documents.len(), 1);
    let doc = &documents[0];
    assert_eq!(doc.title, "Duna");
    assert_eq!(doc.content, "Ler Duna com calma.\n\nLer Duna devagar.");
    assert_eq!(doc.interest, "Leitura");
    assert_eq!(doc.area, "Inbox");
    assert_eq!(doc.tags, vec!["ideia"]);

    assert_eq!(
        reply,
        "Anotado.\n\n✅ Ideia salva.\n• Interesse: Leitura\n• Área: Inbox\n• Título: Duna\n• Resumo: Ler Duna com calma."
    );

    let calls = harness.provider.calls();
    assert_eq!(calls.len(), 2);
    let main_prompt = calls[0].system_prompt.as_deref().unwrap();
    assert!(main_prompt.contains("- INTERESSE «Leitura» → ÁREAS: Geral, Inbox"));
    assert!(main_prompt.contains("Contexto do usuário: Perfil: programador"));
    assert_eq!(calls[0].message, MESSAGE);
    assert!(calls[1].message.starts_with("TÍTULO ORIGINAL:\nduna"));

    // Once for the prompt, once for resolution: snapshots are never reused.
    assert_eq!(harness.taxonomy.fetches(), 2);
}

#[tokio::test]
async fn failed_refinement_persists_original_body() {
    let harness = Harness::with_model(
        ScriptedProvider::new()
            .reply_json(&save_turn("Anotado.", "Duna", "ler duna devagar", "Leitura", "Geral"))
            .fail("timeout"),
    );

    let reply = harness.intake.handle_message(MESSAGE).await.unwrap();

    let doc = &harness.sink.documents()[0];
    assert_eq!(doc.title, "Duna");
    assert_eq!(doc.content, "ler duna devagar");
    assert!(reply.contains("• Resumo: ler duna devagar"));
}

#[tokio::test]
async fn refinement_without_description_counts_as_failure() {
    let harness = Harness::with_model(
        ScriptedProvider::new()
            .reply_json(&save_turn("Anotado.", "Duna", "ler duna", "Leitura", "Geral"))
            .reply_json(&json!({"titulo": "Duna!", "descricao": "", "corpo": "Ler Duna."})),
    );

    harness.intake.handle_message(MESSAGE).await.unwrap();

    let doc = &harness.sink.documents()[0];
    assert_eq!(doc.title, "Duna");
    assert_eq!(doc.content, "ler duna");
}

#[tokio::test]
async fn missing_category_stops_before_refinement_and_persistence() {
    let harness = Harness::with_model(
        ScriptedProvider::new().reply_json(&save_turn("Anotado.", "Duna", "ler", "", "")),
    );

    let reply = harness.intake.handle_message(MESSAGE).await.unwrap();

    assert_eq!(reply, MISSING_CATEGORY);
    assert!(harness.sink.documents().is_empty());
    assert_eq!(harness.provider.calls().len(), 1);
}

#[tokio::test]
async fn one_sided_category_is_missing_too() {
    let harness = Harness::with_model(
        ScriptedProvider::new().reply_json(&save_turn("Anotado.", "Duna", "ler", "Leitura", " ")),
    );

    let reply = harness.intake.handle_message(MESSAGE).await.unwrap();
    assert_eq!(reply, MISSING_CATEGORY);
    assert!(harness.sink.documents().is_empty());
}

#[tokio::test]
async fn unknown_pair_is_unresolvable() {
    let harness = Harness::with_model(
        ScriptedProvider::new()
            .reply_json(&save_turn("Anotado.", "Rock", "ouvir rock", "Música", "Rock"))
            .reply_json(&refinement("Rock", "Ouvir rock.", "Ouvir rock.")),
    );

    let reply = harness.intake.handle_message(MESSAGE).await.unwrap();

    assert_eq!(reply, UNRESOLVABLE_CATEGORY);
    assert!(harness.sink.documents().is_empty());
}

#[tokio::test]
async fn child_then_parent_order_is_swapped() {
    let harness = Harness::with_model(
        ScriptedProvider::new()
            .reply_json(&save_turn(
                "Anotado em Tecnologia > Ideias.",
                "App",
                "um app de notas",
                "Tecnologia",
                "Ideias",
            ))
            .fail("refinement offline"),
    );

    let reply = harness
        .intake
        .handle_message("anotar em Tecnologia > Ideias: um app de notas")
        .await
        .unwrap();

    let doc = &harness.sink.documents()[0];
    assert_eq!(doc.interest, "Ideias");
    assert_eq!(doc.area, "Tecnologia");
    assert!(reply.contains("• Interesse: Ideias\n• Área: Tecnologia"));
}

#[tokio::test]
async fn persistence_failure_keeps_conversational_reply() {
    let harness = Harness::new(
        ScriptedProvider::new()
            .reply_json(&save_turn("Anotado em Leitura > Geral.", "Duna", "ler", "Leitura", "Geral"))
            .reply_json(&refinement("Duna", "Ler.", "Ler.")),
        FakeTaxonomy::standard(),
        RecordingSink::failing(),
    );

    let reply = harness.intake.handle_message(MESSAGE).await.unwrap();

    assert_eq!(
        reply,
        "Anotado em Leitura > Geral.\n\n⚠️ Não foi possível gravar no Obsidian (verifique servidor)."
    );
}

#[tokio::test]
async fn offline_taxonomy_cannot_resolve() {
    let harness = Harness::new(
        ScriptedProvider::new()
            .reply_json(&save_turn("Anotado.", "Duna", "ler", "Leitura", "Geral"))
            .reply_json(&refinement("Duna", "Ler.", "Ler.")),
        FakeTaxonomy::offline(),
        RecordingSink::default(),
    );

    let reply = harness.intake.handle_message(MESSAGE).await.unwrap();

    assert_eq!(reply, UNRESOLVABLE_CATEGORY);
    let main_prompt = harness.provider.calls()[0].system_prompt.clone().unwrap();
    assert!(!main_prompt.contains("INTERESSE «"));
}

#[tokio::test]
async fn message_text_stands_in_for_missing_summary() {
    let harness = Harness::with_model(
        ScriptedProvider::new()
            .reply_json(&save_turn("Anotado.", "", "", "Pessoal", "Inbox"))
            .fail("refinement offline"),
    );

    harness
        .intake
        .handle_message("guardar: comprar presente\npara a Ana")
        .await
        .unwrap();

    let doc = &harness.sink.documents()[0];
    assert_eq!(doc.title, "guardar: comprar presente");
    assert_eq!(doc.content, "guardar: comprar presente\npara a Ana");
}

#[tokio::test]
async fn long_first_line_is_summarized() {
    let body = "x".repeat(200);
    let harness = Harness::with_model(
        ScriptedProvider::new()
            .reply_json(&save_turn("Anotado.", "Longa", &body, "Pessoal", "Inbox"))
            .fail("refinement offline"),
    );

    let reply = harness.intake.handle_message(MESSAGE).await.unwrap();

    let expected = format!("• Resumo: {}...", "x".repeat(137));
    assert!(reply.ends_with(&expected));
}

#[tokio::test]
async fn save_idea_reports_outcome_directly() {
    let harness = Harness::with_model(ScriptedProvider::new().fail("refinement offline"));
    let draft = IdeaDraft {
        title: "Duna".into(),
        summary: "ler".into(),
        tags: vec![],
        interest: "  LEITURA ".into(),
        area: "ger".into(),
    };

    let outcome = harness.intake.save_idea(&draft, "ler").await;

    match outcome {
        SaveOutcome::Saved {
            category, title, ..
        } => {
            assert_eq!(category.interest, "Leitura");
            assert_eq!(category.area, "Geral");
            assert_eq!(title, "Duna");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}
