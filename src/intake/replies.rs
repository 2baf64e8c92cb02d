//! User-facing fixed texts (pt-BR).

/// Reply when the model produced nothing usable at all.
pub const FALLBACK_REPLY: &str = "Recebi sua mensagem.";
/// Reply when a parsed object carries no `resposta`.
pub const DEFAULT_REPLY: &str = "Ok.";
pub const UNTITLED: &str = "Sem título";
pub const DEFAULT_TASK_TITLE: &str = "Tarefa";
pub const NO_SUMMARY: &str = "(sem resumo)";

pub const GENERIC_ERROR: &str = "Não foi possível processar agora. Tente mais tarde.";
pub const PENDING_CANCELLED: &str = "Ok — não criei nada.";

pub const MISSING_CATEGORY: &str = "⚠️ Não foi possível salvar. Toda ideia precisa de um interesse e uma área já existentes. \
Pergunte 'quais são minhas categorias' para ver a lista.";
pub const UNRESOLVABLE_CATEGORY: &str = "⚠️ Não foi possível salvar a ideia. Só é possível salvar em um interesse e uma área já cadastrados. \
Pergunte 'quais são minhas categorias' para ver a lista e use um deles.";
pub const BACKEND_WRITE_FAILED: &str = "⚠️ Não foi possível gravar no Obsidian (verifique servidor).";
pub const CATEGORIES_OFFLINE: &str = "⚠️ Não consegui carregar interesses/áreas agora (servidor offline).";

pub const IDEA_SAVED: &str = "✅ Ideia salva.";
pub const TASK_CREATED: &str = "✅ Tarefa criada no planejamento empresarial.";

pub const CATEGORY_LIST_HEADER: &str = "Suas categorias são:";
pub const CATEGORY_LIST_EMPTY: &str = "(sem interesses/áreas cadastrados)";
pub const NO_AREAS: &str = "(nenhuma área)";

pub const VOICE_UNAVAILABLE: &str = "Transcrição de áudio ainda não configurada. Envie apenas texto.";
