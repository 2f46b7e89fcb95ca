// Default French cash-register keymap

use till_keycode::Key;

use crate::{CommandId, CommandSpec, Keymap};

pub(crate) const HELP_KEY: Key = Key::F1;
pub(crate) const CANCEL_KEY: Key = Key::Escape;

/// Command specs of the stock keymap, in catalog order.
pub(crate) fn default_commands() -> Vec<CommandSpec> {
    vec![
        CommandSpec::new(CommandId::Help, &[HELP_KEY], "Aide", "Afficher les raccourcis")
            .during_text_entry(),
        CommandSpec::new(
            CommandId::SearchProduct,
            &[Key::F2],
            "Rechercher produit",
            "Rechercher un article par nom ou code",
        ),
        CommandSpec::new(
            CommandId::SelectCustomer,
            &[Key::F3],
            "Client",
            "Associer un client à la vente",
        ),
        CommandSpec::new(
            CommandId::Discount,
            &[Key::F4],
            "Remise",
            "Appliquer une remise",
        ),
        CommandSpec::new(
            CommandId::HoldCart,
            &[Key::F6],
            "Mettre en attente",
            "Mettre la vente en attente",
        ),
        CommandSpec::new(
            CommandId::OpenDrawer,
            &[Key::F8],
            "Ouvrir tiroir",
            "Ouvrir le tiroir-caisse",
        ),
        CommandSpec::new(
            CommandId::ClearCart,
            &[Key::F9],
            "Vider panier",
            "Supprimer tous les articles",
        ),
        CommandSpec::new(CommandId::Payment, &[Key::F12], "Payer", "Encaisser la vente"),
        CommandSpec::new(
            CommandId::IncreaseQuantity,
            &[Key::Char('+'), Key::Char('=')],
            "Quantité +",
            "Augmenter la quantité de la ligne",
        ),
        CommandSpec::new(
            CommandId::DecreaseQuantity,
            &[Key::Char('-')],
            "Quantité −",
            "Diminuer la quantité de la ligne",
        ),
        CommandSpec::new(
            CommandId::DeleteLine,
            &[Key::Delete, Key::Backspace],
            "Supprimer ligne",
            "Retirer la ligne sélectionnée",
        ),
        CommandSpec::new(CommandId::Cancel, &[CANCEL_KEY], "Annuler", "Annuler / fermer")
            .during_text_entry()
            .during_blocking_dialog(),
    ]
}

impl Default for Keymap {
    fn default() -> Self {
        Self {
            pass_modified: true,
            commands: default_commands(),
        }
    }
}
