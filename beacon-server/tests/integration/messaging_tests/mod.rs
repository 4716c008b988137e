mod test_full_negotiation_cycle;
mod test_offer_is_relayed;
mod test_relay_to_absent_peer_is_dropped;
