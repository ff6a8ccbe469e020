/// Хранит ключ последнего запроса
///
/// Запрос по тому же ключу повторно не отправляется. Ответ применяется только
/// если его ключ всё ещё текущий: ответы на вытесненные запросы отбрасываются,
/// в каком бы порядке они ни пришли. Сам сетевой запрос не отменяется.
#[derive(Debug, Clone)]
pub struct QueryGuard<K> {
    current: Option<K>,
}

impl<K: PartialEq> QueryGuard<K> {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Сделать `key` текущим. Возвращает `false`, если он уже текущий
    /// и новый запрос не нужен.
    pub fn begin(&mut self, key: K) -> bool {
        if self.is_current(&key) {
            return false;
        }
        self.current = Some(key);
        true
    }

    pub fn is_current(&self, key: &K) -> bool {
        self.current.as_ref() == Some(key)
    }

    pub fn current(&self) -> Option<&K> {
        self.current.as_ref()
    }
}

impl<K: PartialEq> Default for QueryGuard<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_key_is_deduplicated() {
        let mut guard = QueryGuard::new();
        assert!(guard.begin("a"));
        assert!(!guard.begin("a"));
        assert_eq!(guard.current(), Some(&"a"));
    }

    #[test]
    fn test_newer_key_supersedes_older() {
        let mut guard = QueryGuard::new();
        guard.begin("a");
        guard.begin("b");
        // ответ по "a" пришёл позже, чем был запрошен "b"
        assert!(!guard.is_current(&"a"));
        assert!(guard.is_current(&"b"));
    }

    #[test]
    fn test_returning_to_previous_key_starts_new_request() {
        let mut guard = QueryGuard::new();
        guard.begin("a");
        guard.begin("b");
        assert!(guard.begin("a"));
        assert!(guard.is_current(&"a"));
    }

    #[test]
    fn test_empty_guard_accepts_nothing() {
        let guard: QueryGuard<&str> = QueryGuard::default();
        assert!(!guard.is_current(&"a"));
        assert_eq!(guard.current(), None);
    }
}
