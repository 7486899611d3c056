//! Renderer-independent description of what the board looks like for a given state.

use crate::*;

pub const GAME_OVER_TITLE: &str = "game over";
pub const RESTART_LABEL: &str = "Try again";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BlockView {
    pub color: ColorId,
    pub position: BlockPosition,
    pub lit: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameOverOverlay {
    pub title: &'static str,
    pub restart_label: &'static str,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BoardView {
    pub score: u32,
    pub highscore: u32,
    pub game_over_overlay: Option<GameOverOverlay>,
    /// Play area is desaturated.
    pub grayscale: bool,
    /// Blocks react to pointer input.
    pub interactive: bool,
    pub rows: [[BlockView; 2]; 2],
}

impl BoardView {
    pub fn blocks(&self) -> impl Iterator<Item = &BlockView> {
        self.rows.iter().flatten()
    }
}

/// Builds the view of `controller`, with `lit` being the block currently flashing, if any.
pub fn render<G: SequenceGenerator>(
    controller: &RoundController<G>,
    lit: Option<ColorId>,
) -> BoardView {
    let game = controller.game();
    let block = |color: ColorId| BlockView {
        color,
        position: color.position(),
        lit: lit == Some(color),
    };
    let [top_left, top_right, bottom_left, bottom_right] = ColorId::ALL.map(block);

    BoardView {
        score: game.score,
        highscore: game.highscore,
        game_over_overlay: game.game_over.then_some(GameOverOverlay {
            title: GAME_OVER_TITLE,
            restart_label: RESTART_LABEL,
        }),
        grayscale: game.game_over,
        interactive: game.accepts_input() && controller.current_match().is_started(),
        rows: [[top_left, top_right], [bottom_left, bottom_right]],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ColorId::*;

    fn controller() -> RoundController<ScriptedSequenceGenerator> {
        RoundController::new(
            GameConfig::classic(),
            ScriptedSequenceGenerator::new([Blue, Red]),
        )
    }

    #[test]
    fn blocks_are_laid_out_in_two_rows_of_two() {
        let view = render(&controller(), None);

        for (row, blocks) in view.rows.iter().enumerate() {
            for (column, block) in blocks.iter().enumerate() {
                assert_eq!(block.position.cell(), (row, column));
                assert_eq!(block.color.position(), block.position);
            }
        }
        assert_eq!(view.rows[0][0].position.class_name(), "top-left");
        assert_eq!(view.rows[1][1].color, Blue);
    }

    #[test]
    fn board_is_inert_before_the_first_round() {
        assert!(!render(&controller(), None).interactive);
    }

    #[test]
    fn presentation_disables_interaction_and_lights_one_block() {
        let mut controller = controller();
        controller.start_match();

        let view = render(&controller, Some(Blue));

        assert!(!view.interactive);
        assert!(!view.grayscale);
        assert_eq!(view.game_over_overlay, None);
        let lit: alloc::vec::Vec<_> = view.blocks().filter(|block| block.lit).collect();
        assert_eq!(lit.len(), 1);
        assert_eq!(lit[0].color, Blue);
    }

    #[test]
    fn playing_state_is_interactive() {
        let mut controller = controller();
        let tag = controller.start_match();
        controller.make_presentation(tag).unwrap();

        let view = render(&controller, None);

        assert!(view.interactive);
        assert!(view.blocks().all(|block| !block.lit));
    }

    #[test]
    fn game_over_shows_overlay_and_desaturates() {
        let mut controller = controller().with_highscore(3);
        let tag = controller.start_match();
        controller.make_presentation(tag).unwrap();
        controller.submit_guess(Green).unwrap();

        let view = render(&controller, None);

        assert_eq!(view.score, 0);
        assert_eq!(view.highscore, 3);
        assert!(view.grayscale);
        assert!(!view.interactive);
        let overlay = view.game_over_overlay.unwrap();
        assert_eq!(overlay.title, "game over");
        assert_eq!(overlay.restart_label, "Try again");
    }
}
