//! Global CSS for the rendered pages.
//!
//! Class names follow `cheerpaw_core::anchors`; the animation classes there
//! (`flash`, `pop`, `shake`, `heart`) are only meaningful with these rules.

pub const GLOBAL_STYLES: &str = r#"
/* === CSS Custom Properties === */
:root {
  --paper: #fffaf3;
  --paper-deep: #f6ecdd;
  --ink: #3b2f2a;
  --ink-soft: rgba(59, 47, 42, 0.65);
  --coral: #ff7a6b;
  --coral-deep: #e2574a;
  --honey: #f5b942;
  --leaf: #6bbf7a;
  --shadow: 0 6px 18px rgba(59, 47, 42, 0.12);

  --radius: 14px;
  --font-body: 'Nunito', 'Helvetica Neue', Arial, sans-serif;
}

* {
  box-sizing: border-box;
}

body {
  margin: 0;
  background: var(--paper);
  color: var(--ink);
  font-family: var(--font-body);
}

main {
  max-width: 820px;
  margin: 0 auto;
  padding: 1.5rem 1rem 4rem;
}

/* === Header === */
.site-header {
  display: flex;
  align-items: center;
  justify-content: space-between;
  gap: 1rem;
  margin-bottom: 1.5rem;
}

.nav-link {
  color: var(--coral-deep);
  font-weight: 700;
  text-decoration: none;
  cursor: pointer;
}

.nav-link:hover {
  text-decoration: underline;
}

.wallet {
  display: flex;
  gap: 0.75rem;
  align-items: baseline;
  padding: 0.5rem 0.9rem;
  border-radius: var(--radius);
  background: var(--paper-deep);
}

.wallet-label {
  font-size: 0.8rem;
  color: var(--ink-soft);
}

#wallet-balance,
#wallet-stapo {
  font-weight: 800;
  font-variant-numeric: tabular-nums;
}

/* === Buttons === */
button {
  font: inherit;
  border: none;
  border-radius: 999px;
  padding: 0.45rem 1.1rem;
  background: var(--coral);
  color: #fff;
  font-weight: 700;
  cursor: pointer;
  transition: background 0.15s ease, transform 0.1s ease;
}

button:hover {
  background: var(--coral-deep);
}

button:active {
  transform: scale(0.97);
}

button:disabled,
button.is-busy {
  opacity: 0.55;
  cursor: default;
  pointer-events: none;
}

/* === Animal cards === */
.animal-grid {
  display: grid;
  grid-template-columns: repeat(auto-fill, minmax(220px, 1fr));
  gap: 1rem;
}

.animal-card {
  position: relative;
  padding: 1rem;
  border-radius: var(--radius);
  background: #fff;
  box-shadow: var(--shadow);
  opacity: 0;
  transform: translateY(12px);
  transition: opacity 0.4s ease, transform 0.4s ease;
}

.animal-card.is-revealed {
  opacity: 1;
  transform: none;
}

.animal-media {
  width: 100%;
  aspect-ratio: 4 / 3;
  object-fit: cover;
  border-radius: calc(var(--radius) - 4px);
  transition: transform 0.25s ease;
}

.animal-card:hover .animal-media,
.animal-media.is-hoverlock {
  transform: scale(1.05);
}

.animal-name {
  margin: 0.6rem 0 0.1rem;
}

.animal-species {
  margin: 0;
  color: var(--ink-soft);
}

.animal-score {
  display: flex;
  align-items: center;
  gap: 0.5rem;
  margin: 0.6rem 0;
}

.point {
  font-weight: 800;
  font-variant-numeric: tabular-nums;
}

.point.flash {
  color: var(--coral-deep);
  animation: flash 0.35s ease;
}

.oshii-badge {
  display: inline-block;
  padding: 0.1rem 0.5rem;
  border-radius: 999px;
  background: var(--honey);
  font-size: 0.75rem;
  font-weight: 800;
}

.oshii-badge.pop {
  animation: pop 0.4s ease;
}

.animal-card.shake {
  animation: shake 0.4s ease;
}

/* === Hearts === */
.heart {
  position: absolute;
  pointer-events: none;
  color: var(--coral);
  font-size: 1.4rem;
  animation: heart-float 1s ease-out forwards;
}

/* === Carousel === */
.carousel {
  position: relative;
  overflow: hidden;
  border-radius: var(--radius);
  margin-bottom: 1.5rem;
  box-shadow: var(--shadow);
  aspect-ratio: 16 / 7;
  background: var(--paper-deep);
}

.carousel-slide {
  position: absolute;
  inset: 0;
  width: 100%;
  height: 100%;
  object-fit: cover;
  opacity: 0;
  transition: opacity 0.5s ease;
}

.carousel-slide.is-active {
  opacity: 1;
}

.carousel-indicators {
  position: absolute;
  left: 0;
  right: 0;
  bottom: 0.6rem;
  display: flex;
  justify-content: center;
  gap: 0.4rem;
}

.carousel-indicator {
  width: 10px;
  height: 10px;
  padding: 0;
  border-radius: 50%;
  background: rgba(255, 255, 255, 0.6);
}

.carousel-indicator.is-active {
  background: #fff;
}

/* === Charge page === */
.plans {
  display: grid;
  grid-template-columns: repeat(auto-fill, minmax(160px, 1fr));
  gap: 1rem;
}

.plan {
  padding: 1rem;
  border-radius: var(--radius);
  background: #fff;
  box-shadow: var(--shadow);
  text-align: center;
}

.plan-coins {
  font-size: 1.3rem;
  font-weight: 800;
}

.plan-price {
  display: block;
  margin: 0.3rem 0 0.8rem;
  color: var(--ink-soft);
}

/* === Modals === */
.modal {
  position: fixed;
  inset: 0;
  background: rgba(59, 47, 42, 0.45);
  z-index: 20;
}

.modal-content {
  max-width: 360px;
  margin: 18vh auto 0;
  padding: 1.5rem;
  border-radius: var(--radius);
  background: #fff;
  box-shadow: var(--shadow);
  text-align: center;
}

.modal-content button + button,
.modal-content button + a {
  margin-left: 0.5rem;
}

/* === Toasts === */
.toast-stack {
  position: fixed;
  right: 1rem;
  bottom: 1rem;
  display: flex;
  flex-direction: column;
  gap: 0.5rem;
  z-index: 30;
}

.toast {
  padding: 0.7rem 1rem;
  border-radius: 10px;
  background: var(--ink);
  color: #fff;
  box-shadow: var(--shadow);
  cursor: pointer;
}

.host-error {
  padding: 2rem;
  color: var(--coral-deep);
}

/* === Keyframes === */
@keyframes flash {
  0% { transform: scale(1); }
  40% { transform: scale(1.35); }
  100% { transform: scale(1); }
}

@keyframes pop {
  0% { transform: scale(0.6); }
  60% { transform: scale(1.2); }
  100% { transform: scale(1); }
}

@keyframes shake {
  0%, 100% { transform: translateX(0); }
  25% { transform: translateX(-4px) rotate(-1deg); }
  75% { transform: translateX(4px) rotate(1deg); }
}

@keyframes heart-float {
  from { opacity: 1; transform: translateY(0) scale(1); }
  to { opacity: 0; transform: translateY(-80px) scale(1.4); }
}

@media (prefers-reduced-motion: reduce) {
  *, *::before, *::after {
    animation: none !important;
    transition: none !important;
  }
}
"#;
