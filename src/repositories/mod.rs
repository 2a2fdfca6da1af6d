//! Repositories module - Coordinatore per tutti i repository del progetto
//!
//! Questo modulo organizza i repository in sotto-moduli separati per una migliore manutenibilità.
//! Ogni repository gestisce le operazioni di database per una specifica entità.

// ************************* NOTA SU SQLX ************************* //

/*
   Le query usano sqlx::query_as::<_, Entity>(...) con le entity che derivano FromRow,
   quindi il controllo dello schema avviene a run-time e la build non richiede un database
   raggiungibile. I placeholder sono `?` (SQLite) e i valori si legano con .bind(...).

   Number of Rows	Method to Call
   None	            .execute(...).await          INSERT/UPDATE/DELETE senza RETURNING
   Zero or One	    .fetch_optional(...).await   righe extra ignorate
   Exactly One	    .fetch_one(...).await        errore se nessuna riga, usarlo per COUNT e RETURNING
   Multiple	        .fetch_all(...).await

   Tutti i metodi propagano sqlx::Error con `?`: la conversione in AppError avviene nei service.
*/

// ************************* MODULI REPOSITORY ************************* //

pub mod follow;
pub mod message;
pub mod traits;
pub mod user;

// Re-esportazione dei trait per facilitare l'import
pub use traits::{Create, Delete, Read};

// Re-esportazione delle struct dei repository per facilitare l'import
pub use follow::FollowRepository;
pub use message::MessageRepository;
pub use user::UserRepository;
