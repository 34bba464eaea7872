pub mod docs;
pub mod users;
pub mod videos;

#[cfg(test)]
pub fn test_pool() -> crate::DbPool {
    use diesel::r2d2::{ConnectionManager, Pool};

    // Never actually connects: the handlers under test bail out on parameter
    // validation before touching the pool.
    let manager = ConnectionManager::new("mysql://root@localhost:3306/unreachable");
    Pool::builder()
        .max_size(1)
        .min_idle(Some(0))
        .build_unchecked(manager)
}
