/// Состояние загрузки одного ресурса
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Pending,
    Failed,
    Ready,
}

/// Ресурс, загружаемый с сервера: статус плюс последнее успешно полученное значение
///
/// Повторный запрос того же ресурса (`begin`) и ошибка не стирают ранее
/// загруженные данные. Запрос с другими параметрами начинается с `begin_fresh`:
/// данные прежних параметров к нему не относятся.
#[derive(Debug, Clone, PartialEq)]
pub struct Loadable<T> {
    status: LoadStatus,
    data: Option<T>,
    error: Option<String>,
}

impl<T> Loadable<T> {
    pub fn pending() -> Self {
        Self {
            status: LoadStatus::Pending,
            data: None,
            error: None,
        }
    }

    pub fn ready(value: T) -> Self {
        Self {
            status: LoadStatus::Ready,
            data: Some(value),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            status: LoadStatus::Failed,
            data: None,
            error: Some(error.into()),
        }
    }

    /// Повторная загрузка с теми же параметрами
    pub fn begin(&mut self) {
        self.status = LoadStatus::Pending;
        self.error = None;
    }

    /// Загрузка с новыми параметрами: прежнее значение сбрасывается
    pub fn begin_fresh(&mut self) {
        self.begin();
        self.data = None;
    }

    pub fn resolve(&mut self, value: T) {
        self.status = LoadStatus::Ready;
        self.data = Some(value);
        self.error = None;
    }

    pub fn fail(&mut self, error: impl Into<String>) {
        self.status = LoadStatus::Failed;
        self.error = Some(error.into());
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn is_pending(&self) -> bool {
        self.status == LoadStatus::Pending
    }

    pub fn is_failed(&self) -> bool {
        self.status == LoadStatus::Failed
    }

    /// Последнее успешно загруженное значение
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Self::pending()
    }
}
