#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    CreateEntry,
    EditEntry(i64),
}

impl Route {
    pub fn path(self) -> String {
        match self {
            Self::CreateEntry => "/cadastro-lancamentos".to_string(),
            Self::EditEntry(id) => format!("/cadastro-lancamentos/{id}"),
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::CreateEntry => "Cadastro de lançamento",
            Self::EditEntry(_) => "Atualização de lançamento",
        }
    }
}

pub trait Navigator {
    fn navigate(&mut self, route: Route);
}
