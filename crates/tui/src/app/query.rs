use api_types::{
    SelectOption,
    entry::{Entry, EntryFilter, EntryKind, EntryStatus},
    user::User,
};
use chrono::{DateTime, Local};

use crate::{
    navigation::{Navigator, Route},
    notify::Notifier,
    service::LedgerService,
};

pub const MSG_YEAR_REQUIRED: &str = "O preenchimento do campo Ano é obrigatório.";
pub const MSG_NOT_LOGGED_IN: &str = "Usuário não autenticado.";
pub const MSG_NO_RESULTS: &str = "Nenhum resultado encontrado.";
pub const MSG_DELETED: &str = "Lançamento deletado com sucesso.";
pub const MSG_DELETE_FAILED: &str = "Ocorreu um erro ao tentar deletar o lançamento.";
pub const MSG_STATUS_UPDATED: &str = "Status atualizado com sucesso!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Year,
    Month,
    Description,
    Kind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Form(FormField),
    Table,
}

impl Focus {
    const ORDER: [Focus; 5] = [
        Focus::Form(FormField::Year),
        Focus::Form(FormField::Month),
        Focus::Form(FormField::Description),
        Focus::Form(FormField::Kind),
        Focus::Table,
    ];

    fn position(self) -> usize {
        Self::ORDER
            .iter()
            .position(|focus| *focus == self)
            .unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Delete confirmation. At most one entry is pending at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfirmDialog {
    #[default]
    Closed,
    Open(Entry),
}

impl ConfirmDialog {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }
}

/// State of the "Consulta lançamentos" screen: filter form, result rows and
/// the delete confirmation.
#[derive(Debug)]
pub struct QueryPanel {
    pub year: String,
    pub description: String,
    pub month_options: Vec<SelectOption<u32>>,
    pub kind_options: Vec<SelectOption<EntryKind>>,
    pub month_index: usize,
    pub kind_index: usize,
    pub entries: Vec<Entry>,
    pub selected: usize,
    pub focus: Focus,
    pub dialog: ConfirmDialog,
    pub last_search: Option<DateTime<Local>>,
}

impl QueryPanel {
    pub fn new(
        month_options: Vec<SelectOption<u32>>,
        kind_options: Vec<SelectOption<EntryKind>>,
    ) -> Self {
        Self {
            year: String::new(),
            description: String::new(),
            month_options,
            kind_options,
            month_index: 0,
            kind_index: 0,
            entries: Vec::new(),
            selected: 0,
            focus: Focus::Form(FormField::Year),
            dialog: ConfirmDialog::Closed,
            last_search: None,
        }
    }

    pub fn for_service<S: LedgerService>(service: &S) -> Self {
        Self::new(service.months(), service.kinds())
    }

    pub fn month(&self) -> Option<u32> {
        self.month_options
            .get(self.month_index)
            .and_then(|option| option.value)
    }

    pub fn kind(&self) -> Option<EntryKind> {
        self.kind_options
            .get(self.kind_index)
            .and_then(|option| option.value)
    }

    pub fn month_label(&self) -> &'static str {
        self.month_options
            .get(self.month_index)
            .map_or("", |option| option.label)
    }

    pub fn kind_label(&self) -> &'static str {
        self.kind_options
            .get(self.kind_index)
            .map_or("", |option| option.label)
    }

    pub fn cycle_select(&mut self, forward: bool) {
        let (index, len) = match self.focus {
            Focus::Form(FormField::Month) => (&mut self.month_index, self.month_options.len()),
            Focus::Form(FormField::Kind) => (&mut self.kind_index, self.kind_options.len()),
            _ => return,
        };
        if len == 0 {
            return;
        }
        *index = if forward {
            (*index + 1) % len
        } else {
            (*index + len - 1) % len
        };
    }

    pub fn is_editing_text(&self) -> bool {
        matches!(
            self.focus,
            Focus::Form(FormField::Year | FormField::Description)
        )
    }

    /// Text field under focus, if the focus is on one.
    pub fn active_input_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Focus::Form(FormField::Year) => Some(&mut self.year),
            Focus::Form(FormField::Description) => Some(&mut self.description),
            _ => None,
        }
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.entries.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.selected = (self.selected + 1).min(self.entries.len() - 1);
    }

    pub fn select_prev(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.entries.len().saturating_sub(1));
    }

    pub fn build_filter(&self, user: &User) -> EntryFilter {
        let description = self.description.trim();
        EntryFilter {
            year: self.year.trim().to_string(),
            month: self.month(),
            kind: self.kind(),
            description: (!description.is_empty()).then(|| description.to_string()),
            user_id: user.id,
        }
    }

    /// Runs the search. Remote failures end up as notices; the held rows
    /// are only replaced on success.
    pub async fn search<S, N>(&mut self, service: &S, session: Option<&User>, notifier: &mut N)
    where
        S: LedgerService,
        N: Notifier,
    {
        if self.year.trim().is_empty() {
            notifier.error(MSG_YEAR_REQUIRED);
            return;
        }
        let Some(user) = session else {
            tracing::warn!("search attempted without a session user");
            notifier.error(MSG_NOT_LOGGED_IN);
            return;
        };

        let filter = self.build_filter(user);
        match service.search(&filter).await {
            Ok(entries) => {
                tracing::info!(count = entries.len(), year = %filter.year, "search completed");
                if entries.is_empty() {
                    notifier.warning(MSG_NO_RESULTS);
                }
                self.entries = entries;
                self.selected = 0;
                self.last_search = Some(Local::now());
            }
            Err(err) => {
                tracing::warn!(error = %err, "search failed");
                notifier.error(err.payload());
            }
        }
    }

    pub fn navigate_to_edit<N: Navigator>(&self, id: i64, navigator: &mut N) {
        navigator.navigate(Route::EditEntry(id));
    }

    pub fn navigate_to_create<N: Navigator>(&self, navigator: &mut N) {
        navigator.navigate(Route::CreateEntry);
    }

    pub fn request_delete(&mut self, entry: Entry) {
        self.dialog = ConfirmDialog::Open(entry);
    }

    pub fn cancel_delete(&mut self) {
        self.dialog = ConfirmDialog::Closed;
    }

    /// Deletes the entry recorded by [`Self::request_delete`].
    ///
    /// The row is located by id: if a newer search already dropped it,
    /// nothing is removed locally.
    pub async fn confirm_delete<S, N>(&mut self, service: &S, notifier: &mut N)
    where
        S: LedgerService,
        N: Notifier,
    {
        let ConfirmDialog::Open(target) = &self.dialog else {
            return;
        };
        let id = target.id;

        match service.delete(id).await {
            Ok(()) => {
                if let Some(index) = self.entries.iter().position(|entry| entry.id == id) {
                    self.entries.remove(index);
                    self.clamp_selection();
                }
                self.dialog = ConfirmDialog::Closed;
                tracing::info!(id, "entry deleted");
                notifier.success(MSG_DELETED);
            }
            Err(err) => {
                tracing::warn!(id, error = %err, "delete failed");
                notifier.error(MSG_DELETE_FAILED);
            }
        }
    }

    /// Updates the status remotely, then patches the held row in place.
    ///
    /// A failure is only logged: no notice is shown for it.
    pub async fn change_status<S, N>(
        &mut self,
        service: &S,
        entry: &Entry,
        status: EntryStatus,
        notifier: &mut N,
    ) where
        S: LedgerService,
        N: Notifier,
    {
        match service.update_status(entry.id, status).await {
            Ok(()) => {
                if let Some(held) = self.entries.iter_mut().find(|held| held.id == entry.id) {
                    held.status = status;
                }
                tracing::info!(id = entry.id, ?status, "entry status updated");
                notifier.success(MSG_STATUS_UPDATED);
            }
            Err(err) => {
                tracing::warn!(id = entry.id, error = %err, "status update failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use api_types::Amount;

    use super::*;
    use crate::{client::ClientError, notify::ToastLevel};

    #[derive(Default)]
    struct FakeService {
        search_result: Mutex<Option<Result<Vec<Entry>, ClientError>>>,
        fail_mutations: bool,
        searches: Mutex<Vec<EntryFilter>>,
        deletes: Mutex<Vec<i64>>,
        status_updates: Mutex<Vec<(i64, EntryStatus)>>,
    }

    impl FakeService {
        fn returning(entries: Vec<Entry>) -> Self {
            Self {
                search_result: Mutex::new(Some(Ok(entries))),
                ..Self::default()
            }
        }

        fn failing_search(err: ClientError) -> Self {
            Self {
                search_result: Mutex::new(Some(Err(err))),
                ..Self::default()
            }
        }

        fn failing_mutations() -> Self {
            Self {
                fail_mutations: true,
                ..Self::default()
            }
        }
    }

    impl LedgerService for FakeService {
        async fn search(&self, filter: &EntryFilter) -> Result<Vec<Entry>, ClientError> {
            self.searches.lock().unwrap().push(filter.clone());
            self.search_result
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn delete(&self, id: i64) -> Result<(), ClientError> {
            self.deletes.lock().unwrap().push(id);
            if self.fail_mutations {
                return Err(ClientError::Server("boom".to_string()));
            }
            Ok(())
        }

        async fn update_status(&self, id: i64, status: EntryStatus) -> Result<(), ClientError> {
            self.status_updates.lock().unwrap().push((id, status));
            if self.fail_mutations {
                return Err(ClientError::Server("boom".to_string()));
            }
            Ok(())
        }
    }

    #[derive(Default)]
    struct Recorder {
        notices: Vec<(ToastLevel, String)>,
        routes: Vec<Route>,
    }

    impl Notifier for Recorder {
        fn notify(&mut self, level: ToastLevel, message: String) {
            self.notices.push((level, message));
        }
    }

    impl Navigator for Recorder {
        fn navigate(&mut self, route: Route) {
            self.routes.push(route);
        }
    }

    fn user() -> User {
        User {
            id: 5,
            name: "Alice".to_string(),
            email: "alice@email.com".to_string(),
        }
    }

    fn entry(id: i64, status: EntryStatus) -> Entry {
        Entry {
            id,
            description: format!("Lançamento {id}"),
            month: 1,
            year: 2023,
            amount: Amount::from_cents(10_000 * id),
            kind: EntryKind::Expense,
            status,
            user_id: Some(5),
        }
    }

    fn panel_with(entries: Vec<Entry>) -> QueryPanel {
        let mut panel = QueryPanel::new(api_types::month_options(), api_types::kind_options());
        panel.year = "2023".to_string();
        panel.entries = entries;
        panel
    }

    #[tokio::test]
    async fn search_without_year_never_calls_service() {
        for year in ["", "   "] {
            let service = FakeService::returning(vec![entry(1, EntryStatus::Pending)]);
            let mut panel = panel_with(vec![entry(9, EntryStatus::Pending)]);
            panel.year = year.to_string();
            let mut recorder = Recorder::default();

            panel.search(&service, Some(&user()), &mut recorder).await;

            assert!(service.searches.lock().unwrap().is_empty());
            assert_eq!(
                recorder.notices,
                vec![(ToastLevel::Error, MSG_YEAR_REQUIRED.to_string())]
            );
            assert_eq!(panel.entries, vec![entry(9, EntryStatus::Pending)]);
        }
    }

    #[tokio::test]
    async fn search_without_session_is_rejected_locally() {
        let service = FakeService::returning(vec![entry(1, EntryStatus::Pending)]);
        let mut panel = panel_with(Vec::new());
        let mut recorder = Recorder::default();

        panel.search(&service, None, &mut recorder).await;

        assert!(service.searches.lock().unwrap().is_empty());
        assert_eq!(
            recorder.notices,
            vec![(ToastLevel::Error, MSG_NOT_LOGGED_IN.to_string())]
        );
    }

    #[tokio::test]
    async fn search_replaces_rows_in_server_order() {
        let rows = vec![
            entry(3, EntryStatus::Pending),
            entry(1, EntryStatus::Settled),
            entry(2, EntryStatus::Cancelled),
        ];
        let service = FakeService::returning(rows.clone());
        let mut panel = panel_with(vec![entry(9, EntryStatus::Pending)]);
        panel.month_index = 3;
        panel.kind_index = 2;
        panel.description = "  aluguel ".to_string();
        let mut recorder = Recorder::default();

        panel.search(&service, Some(&user()), &mut recorder).await;

        assert_eq!(panel.entries, rows);
        assert!(recorder.notices.is_empty());
        assert!(panel.last_search.is_some());
        assert_eq!(
            service.searches.lock().unwrap().as_slice(),
            &[EntryFilter {
                year: "2023".to_string(),
                month: Some(3),
                kind: Some(EntryKind::Income),
                description: Some("aluguel".to_string()),
                user_id: 5,
            }]
        );
    }

    #[tokio::test]
    async fn empty_search_clears_rows_and_warns_once() {
        let service = FakeService::returning(Vec::new());
        let mut panel = panel_with(vec![entry(9, EntryStatus::Pending)]);
        let mut recorder = Recorder::default();

        panel.search(&service, Some(&user()), &mut recorder).await;

        assert!(panel.entries.is_empty());
        assert_eq!(
            recorder.notices,
            vec![(ToastLevel::Warning, MSG_NO_RESULTS.to_string())]
        );
        let searches = service.searches.lock().unwrap();
        assert_eq!(searches[0].month, None);
        assert_eq!(searches[0].kind, None);
        assert_eq!(searches[0].description, None);
    }

    #[tokio::test]
    async fn failed_search_keeps_stale_rows_and_shows_payload() {
        let service =
            FakeService::failing_search(ClientError::Validation("Usuário não encontrado.".into()));
        let before = vec![entry(1, EntryStatus::Pending), entry(2, EntryStatus::Pending)];
        let mut panel = panel_with(before.clone());
        let mut recorder = Recorder::default();

        panel.search(&service, Some(&user()), &mut recorder).await;

        assert_eq!(panel.entries, before);
        assert_eq!(
            recorder.notices,
            vec![(ToastLevel::Error, "Usuário não encontrado.".to_string())]
        );
    }

    #[test]
    fn navigation_targets_registration_routes() {
        let panel = panel_with(Vec::new());
        let mut recorder = Recorder::default();

        panel.navigate_to_edit(7, &mut recorder);
        panel.navigate_to_create(&mut recorder);

        assert_eq!(recorder.routes, vec![Route::EditEntry(7), Route::CreateEntry]);
        assert!(recorder.notices.is_empty());
    }

    #[test]
    fn request_then_cancel_leaves_rows_untouched() {
        let rows = vec![entry(1, EntryStatus::Pending)];
        let mut panel = panel_with(rows.clone());

        panel.request_delete(rows[0].clone());
        assert!(panel.dialog.is_open());
        panel.cancel_delete();

        assert_eq!(panel.dialog, ConfirmDialog::Closed);
        assert_eq!(panel.entries, rows);
    }

    #[test]
    fn request_delete_replaces_pending_target() {
        let mut panel = panel_with(Vec::new());
        panel.request_delete(entry(1, EntryStatus::Pending));
        panel.request_delete(entry(2, EntryStatus::Pending));
        assert_eq!(
            panel.dialog,
            ConfirmDialog::Open(entry(2, EntryStatus::Pending))
        );
    }

    #[tokio::test]
    async fn confirmed_delete_removes_exactly_the_target() {
        let service = FakeService::default();
        let mut panel = panel_with(vec![
            entry(1, EntryStatus::Pending),
            entry(2, EntryStatus::Pending),
            entry(3, EntryStatus::Pending),
        ]);
        panel.selected = 2;
        let mut recorder = Recorder::default();

        panel.request_delete(entry(2, EntryStatus::Pending));
        panel.confirm_delete(&service, &mut recorder).await;

        assert_eq!(*service.deletes.lock().unwrap(), vec![2]);
        assert_eq!(
            panel.entries,
            vec![entry(1, EntryStatus::Pending), entry(3, EntryStatus::Pending)]
        );
        assert_eq!(panel.selected, 1);
        assert_eq!(panel.dialog, ConfirmDialog::Closed);
        assert_eq!(
            recorder.notices,
            vec![(ToastLevel::Success, MSG_DELETED.to_string())]
        );
    }

    #[tokio::test]
    async fn delete_matches_by_id_not_by_snapshot() {
        let service = FakeService::default();
        let mut panel = panel_with(vec![
            entry(1, EntryStatus::Pending),
            entry(2, EntryStatus::Pending),
        ]);
        let mut recorder = Recorder::default();

        // The dialog holds an older copy of the row; the id still identifies it.
        panel.request_delete(entry(2, EntryStatus::Settled));
        panel.confirm_delete(&service, &mut recorder).await;

        assert_eq!(panel.entries, vec![entry(1, EntryStatus::Pending)]);
    }

    #[tokio::test]
    async fn delete_of_row_no_longer_held_removes_nothing() {
        let service = FakeService::default();
        let rows = vec![entry(1, EntryStatus::Pending), entry(2, EntryStatus::Pending)];
        let mut panel = panel_with(rows.clone());
        let mut recorder = Recorder::default();

        panel.request_delete(entry(9, EntryStatus::Pending));
        panel.confirm_delete(&service, &mut recorder).await;

        assert_eq!(panel.entries, rows);
        assert_eq!(panel.dialog, ConfirmDialog::Closed);
    }

    #[tokio::test]
    async fn failed_delete_keeps_dialog_open() {
        let service = FakeService::failing_mutations();
        let rows = vec![entry(1, EntryStatus::Pending)];
        let mut panel = panel_with(rows.clone());
        let mut recorder = Recorder::default();

        panel.request_delete(rows[0].clone());
        panel.confirm_delete(&service, &mut recorder).await;

        assert_eq!(panel.entries, rows);
        assert_eq!(panel.dialog, ConfirmDialog::Open(rows[0].clone()));
        assert_eq!(
            recorder.notices,
            vec![(ToastLevel::Error, MSG_DELETE_FAILED.to_string())]
        );
    }

    #[tokio::test]
    async fn confirm_with_closed_dialog_is_a_no_op() {
        let service = FakeService::default();
        let mut panel = panel_with(vec![entry(1, EntryStatus::Pending)]);
        let mut recorder = Recorder::default();

        panel.confirm_delete(&service, &mut recorder).await;

        assert!(service.deletes.lock().unwrap().is_empty());
        assert!(recorder.notices.is_empty());
    }

    #[tokio::test]
    async fn status_change_patches_row_in_place() {
        let service = FakeService::default();
        let mut panel = panel_with(vec![
            entry(1, EntryStatus::Pending),
            entry(2, EntryStatus::Pending),
        ]);
        let mut recorder = Recorder::default();

        panel
            .change_status(
                &service,
                &entry(1, EntryStatus::Pending),
                EntryStatus::Settled,
                &mut recorder,
            )
            .await;

        assert_eq!(
            panel.entries,
            vec![entry(1, EntryStatus::Settled), entry(2, EntryStatus::Pending)]
        );
        assert_eq!(
            *service.status_updates.lock().unwrap(),
            vec![(1, EntryStatus::Settled)]
        );
        assert_eq!(
            recorder.notices,
            vec![(ToastLevel::Success, MSG_STATUS_UPDATED.to_string())]
        );
    }

    #[tokio::test]
    async fn status_change_for_row_no_longer_held_still_notifies() {
        let service = FakeService::default();
        let rows = vec![entry(2, EntryStatus::Pending)];
        let mut panel = panel_with(rows.clone());
        let mut recorder = Recorder::default();

        panel
            .change_status(
                &service,
                &entry(1, EntryStatus::Pending),
                EntryStatus::Settled,
                &mut recorder,
            )
            .await;

        assert_eq!(panel.entries, rows);
        assert_eq!(
            *service.status_updates.lock().unwrap(),
            vec![(1, EntryStatus::Settled)]
        );
        assert_eq!(
            recorder.notices,
            vec![(ToastLevel::Success, MSG_STATUS_UPDATED.to_string())]
        );
    }

    #[tokio::test]
    async fn failed_status_change_is_silent() {
        let service = FakeService::failing_mutations();
        let rows = vec![entry(1, EntryStatus::Pending)];
        let mut panel = panel_with(rows.clone());
        let mut recorder = Recorder::default();

        panel
            .change_status(&service, &rows[0], EntryStatus::Cancelled, &mut recorder)
            .await;

        assert_eq!(panel.entries, rows);
        assert!(recorder.notices.is_empty());
    }

    #[test]
    fn focus_cycles_through_form_and_table() {
        let mut focus = Focus::Form(FormField::Year);
        for _ in 0..5 {
            focus = focus.next();
        }
        assert_eq!(focus, Focus::Form(FormField::Year));
        assert_eq!(focus.prev(), Focus::Table);
    }

    #[test]
    fn selects_wrap_around() {
        let mut panel = panel_with(Vec::new());
        panel.focus = Focus::Form(FormField::Month);
        panel.cycle_select(false);
        assert_eq!(panel.month(), Some(12));
        assert_eq!(panel.month_label(), "Dezembro");
        panel.cycle_select(true);
        assert_eq!(panel.month(), None);

        panel.focus = Focus::Form(FormField::Kind);
        panel.cycle_select(true);
        assert_eq!(panel.kind(), Some(EntryKind::Expense));
    }
}
