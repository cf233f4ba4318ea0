//! Deterministic prompt construction for the chat-completion oracle.

use crate::catalog::Catalog;
use std::fmt::Write as _;

/// System instruction enumerating every catalog entry as `id: name`.
pub fn system_prompt(catalog: &Catalog) -> String {
    let mut prompt = String::new();
    prompt.push_str("Você é um classificador determinístico de intenções.\n");
    prompt.push_str(
        "Tarefa: Receba um texto do usuário e escolha O ÚNICO serviço que melhor corresponde, \
         retornando APENAS o número do ID do serviço (um número inteiro) e nada mais.\n",
    );
    prompt.push_str(
        "NUNCA invente serviços, NUNCA invente IDs e NUNCA escreva nomes. Apenas o número do ID.\n",
    );
    prompt.push_str("Lista fixa de serviços válidos (ID: Nome):\n");
    for service in catalog.all() {
        let _ = writeln!(prompt, "{}: {}", service.id, service.name);
    }
    prompt.push_str(
        "\nRestrições:\n- Saída deve ser SÓ o número do ID (ex.: '4').\n- Temperature = 0.\n",
    );
    prompt
}

/// User instruction wrapping one intent.
pub fn user_prompt(intent: &str) -> String {
    format!("Entrada do usuário: {intent:?}\nRetorne apenas o ID (um inteiro).")
}
