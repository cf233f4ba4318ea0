//! The closed catalog of support services an intent can map to.
//!
//! The catalog is built once at startup and passed by reference to every
//! component that validates or renders service ids. Declaration order is
//! preserved so the rendered prompt and the per-service report are stable.

use std::collections::BTreeMap;

/// Numeric service identifier.
pub type ServiceId = u32;

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub id: ServiceId,
    pub name: String,
}

const STANDARD_SERVICES: [(ServiceId, &str); 16] = [
    (1, "Consulta Limite / Vencimento do cartão / Melhor dia de compra"),
    (2, "Segunda via de boleto de acordo"),
    (3, "Segunda via de Fatura"),
    (4, "Status de Entrega do Cartão"),
    (5, "Status de cartão"),
    (6, "Solicitação de aumento de limite"),
    (7, "Cancelamento de cartão"),
    (8, "Telefones de seguradoras"),
    (9, "Desbloqueio de Cartão"),
    (10, "Esqueceu senha / Troca de senha"),
    (11, "Perda e roubo"),
    (12, "Consulta do Saldo Conta do Mais"),
    (13, "Pagamento de contas"),
    (14, "Reclamações"),
    (15, "Atendimento humano"),
    (16, "Token de proposta"),
];

/// Immutable registry of valid services.
#[derive(Debug, Clone)]
pub struct Catalog {
    services: Vec<Service>,
    by_id: BTreeMap<ServiceId, usize>,
}

impl Catalog {
    /// The 16 services the benchmark scores against.
    pub fn standard() -> Self {
        Self::from_entries(STANDARD_SERVICES.iter().map(|(id, name)| Service {
            id: *id,
            name: (*name).to_string(),
        }))
    }

    /// Build a catalog from entries in declaration order.
    ///
    /// A repeated id keeps its first declaration.
    pub fn from_entries(entries: impl IntoIterator<Item = Service>) -> Self {
        let mut services = Vec::new();
        let mut by_id = BTreeMap::new();
        for service in entries {
            if by_id.contains_key(&service.id) {
                continue;
            }
            by_id.insert(service.id, services.len());
            services.push(service);
        }
        Self { services, by_id }
    }

    /// Canonical name for `id`, if it is a member.
    pub fn lookup(&self, id: ServiceId) -> Option<&str> {
        self.by_id
            .get(&id)
            .map(|&index| self.services[index].name.as_str())
    }

    pub fn contains(&self, id: ServiceId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// All services in declaration order.
    pub fn all(&self) -> &[Service] {
        &self.services
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}
